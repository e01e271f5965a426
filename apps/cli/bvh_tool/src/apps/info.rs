use crate::apps::SubApp;
use clap::Parser;

use std::error::Error;

use bvhkit::{BvhDocument, LoadOptions};

#[derive(Parser, Debug)]
pub struct InfoApp {
    #[arg(help = "Path to input bvh file", required = true)]
    pub input_path: String,
    #[arg(short, long, help = "Print summary as json")]
    pub json: bool,
    #[arg(short, long, help = "Accept motion data with fewer frames than declared")]
    pub lenient: bool,
}

impl SubApp for InfoApp {
    fn process(&mut self) -> Result<(), Box<dyn Error>> {
        let options = LoadOptions { lenient_motion: self.lenient };
        let doc = BvhDocument::load_with(&self.input_path, &options)?;
        let summary = doc.summary();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }

        println!("Joints: {} ({} end sites)", summary.joint_count, summary.end_site_count);
        println!("Channels: {}", summary.channel_count);
        println!("Frames: {}", summary.frame_count);
        println!("Frame time: {}s", summary.frame_time);

        for joint in summary.joints.iter() {
            let indent = "  ".repeat(joint.depth);

            if joint.end_site {
                println!("{indent}End Site");
            } else {
                println!("{indent}{} [{}]", joint.name, joint.channels.join(" "));
            }
        }

        Ok(())
    }
}
