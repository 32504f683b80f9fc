use clap::Parser;
use vetclinic_core::{config::DEFAULT_BASE_URL, ClientConfig, EnvelopePolicy};

#[derive(Parser, Debug)]
#[command(
    name = "vetclinic-admin",
    about = "Console de administracao da clinica veterinaria",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Origin of the clinic REST server.
    #[arg(long, env = "VETCLINIC_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Reject responses that do not use the `{"data": ...}` envelope.
    #[arg(long, env = "VETCLINIC_STRICT_ENVELOPE")]
    pub strict_envelope: bool,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.api_url);
        if self.strict_envelope {
            config.envelope = EnvelopePolicy::Strict;
        }
        config
    }
}
