use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::error::Error;

mod info;
mod resave;
mod strip_nubs;
use self::info::*;
use self::resave::*;
use self::strip_nubs::*;

// From Cargo.toml
const PKG_NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) trait SubApp {
    fn process(&mut self) -> Result<(), Box<dyn Error>>;
}

#[derive(Parser, Debug)]
#[command(name = PKG_NAME, version = VERSION, about = "Tools for BVH motion capture files")]
struct Options {
    #[arg(short, long, global = true, help = "Print debug output")]
    verbose: bool,
    #[command(subcommand)]
    commands: SubCommand,
}

#[derive(Subcommand, Debug)]
enum SubCommand {
    #[command(name = "resave", about = "Load and re-write bvh file")]
    Resave(ResaveApp),
    #[command(name = "strip-nubs", about = "Turn finger nub joints into end sites")]
    StripNubs(StripNubsApp),
    #[command(name = "info", about = "Print skeleton and motion info")]
    Info(InfoApp),
}

#[derive(Debug)]
pub struct BvhTool {
    options: Options,
}

impl BvhTool {
    pub fn new() -> BvhTool {
        BvhTool {
            options: Options::parse()
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.options.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        match &mut self.options.commands {
            SubCommand::Resave(app) => app.process(),
            SubCommand::StripNubs(app) => app.process(),
            SubCommand::Info(app) => app.process(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands() {
        let options = Options::try_parse_from(["bvh_tool", "resave", "a.bvh", "b.bvh", "--lenient"]).unwrap();
        assert!(matches!(options.commands, SubCommand::Resave(ResaveApp { lenient: true, .. })));

        let options = Options::try_parse_from(["bvh_tool", "-v", "info", "a.bvh", "--json"]).unwrap();
        assert!(options.verbose);
        assert!(matches!(options.commands, SubCommand::Info(InfoApp { json: true, .. })));

        assert!(Options::try_parse_from(["bvh_tool", "strip-nubs", "a.bvh"]).is_err());
    }
}
