use clap::Parser;
use minegrid_protocol::Endpoints;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub(crate) struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Base URL of the game HTTP API
    #[arg(long)]
    pub api_base: Option<String>,

    /// Base URL of the realtime endpoint
    #[arg(long)]
    pub ws_base: Option<String>,
}

impl Args {
    /// Parses `#--api-base=...&-vv` style hashes.
    pub(crate) fn from_location_hash(hash: &str) -> Result<Self, clap::Error> {
        let args = hash.split(['#', '&']).filter(|arg| !arg.is_empty());
        Self::try_parse_from(std::iter::once("").chain(args))
    }

    pub(crate) fn endpoints(&self) -> Endpoints {
        let api_base = self
            .api_base
            .as_deref()
            .or(option_env!("MINEGRID_API_BASE"))
            .unwrap_or(Endpoints::DEFAULT_API_BASE);
        let ws_base = self
            .ws_base
            .as_deref()
            .or(option_env!("MINEGRID_WS_BASE"))
            .unwrap_or(Endpoints::DEFAULT_WS_BASE);
        Endpoints::new(api_base, ws_base)
    }
}
