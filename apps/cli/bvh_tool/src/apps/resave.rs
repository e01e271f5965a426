use crate::apps::SubApp;
use clap::Parser;

use std::error::Error;

use bvhkit::{BvhDocument, LoadOptions};

#[derive(Parser, Debug)]
pub struct ResaveApp {
    #[arg(help = "Path to input bvh file", required = true)]
    pub input_path: String,
    #[arg(help = "Path to output bvh file", required = true)]
    pub output_path: String,
    #[arg(short, long, help = "Accept motion data with fewer frames than declared")]
    pub lenient: bool,
}

impl SubApp for ResaveApp {
    fn process(&mut self) -> Result<(), Box<dyn Error>> {
        let options = LoadOptions { lenient_motion: self.lenient };
        let doc = BvhDocument::load_with(&self.input_path, &options)?;

        doc.save(&self.output_path)?;
        log::info!("Wrote {} frames to \"{}\"", doc.frame_count(), self.output_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALK: &str = "\
HIERARCHY
ROOT Hips
{
    OFFSET 0 0 0
    CHANNELS 3 Zrotation Xrotation Yrotation
    End Site
    {
        OFFSET 0 1 0
    }
}
MOTION
Frames: 2
Frame Time: 0.5
1 2 3
4 5 6
";

    #[test]
    fn resave_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walk.bvh");
        std::fs::write(&path, WALK).unwrap();

        let path = path.to_string_lossy().into_owned();
        let mut app = ResaveApp {
            input_path: path.clone(),
            output_path: path.clone(),
            lenient: false,
        };
        app.process().unwrap();

        let doc = BvhDocument::load(&path).unwrap();
        assert_eq!(2, doc.frame_count());
        assert_eq!(0.5, doc.frame_time());
        assert!(std::fs::read_to_string(&path).unwrap().contains("OFFSET 0.00000000 1.00000000 0.00000000"));
    }
}
