// The clients defined here produce slides, either from the inference server or canned.

pub mod mock;
pub mod triton;
