use argh::FromArgs;
use gameplay::log;

/// CLI options for the sector simulator
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// verbose level: off, error, warn, info, debug, trace
    #[argh(option)]
    pub verbose: Option<log::LevelFilter>,
    /// path to a TOML scenario. The built-in demo is used if not given
    #[argh(option)]
    pub scenario: Option<String>,
    /// number of tics to run, overrides the scenario and user config
    #[argh(option)]
    pub tics: Option<u32>,
    /// bob the floors of liquid sectors?
    #[argh(option)]
    pub liquid_bob: Option<bool>,
    /// print the thinker profile on exit. Needs the `hprof` feature
    #[argh(switch)]
    pub profile: bool,
}
