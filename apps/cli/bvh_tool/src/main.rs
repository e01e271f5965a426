mod apps;

use apps::BvhTool;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut tool = BvhTool::new();

    TermLogger::init(
        tool.log_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    tool.run()
}
