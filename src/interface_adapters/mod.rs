// Interface adapters: HTTP wiring, external clients, and store implementations.

pub mod clients;
pub mod credentials;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod state;
