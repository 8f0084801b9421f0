pub mod controller;
pub mod router;
pub mod service;

pub use router::{init_passport_auth_router, init_passport_comm_router};
