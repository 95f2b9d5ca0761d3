//! sea-orm entities for the Cadastro API database.

pub mod clientes;
pub mod user_claims;
pub mod users;
