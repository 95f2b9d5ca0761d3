use cadastro_auth_types::policy::ClaimPolicy;

/// Holders of an `ExcluirCliente` claim (any value) may delete clients.
pub struct DeleteClientPolicy;

impl ClaimPolicy for DeleteClientPolicy {
    const NAME: &'static str = "ExcluirCliente";
    const CLAIM_TYPE: &'static str = "ExcluirCliente";
}
