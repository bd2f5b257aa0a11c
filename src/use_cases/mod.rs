// Use cases: application workflows written against the domain ports.

pub mod generate_slides;
pub mod login;
pub mod presentations;
pub mod tokens;

#[cfg(test)]
pub(crate) mod test_support;
