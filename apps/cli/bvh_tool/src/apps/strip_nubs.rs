use crate::apps::SubApp;
use clap::Parser;

use std::error::Error;

use bvhkit::BvhDocument;
use bvhkit::transform::is_finger_nub;

#[derive(Parser, Debug)]
pub struct StripNubsApp {
    #[arg(help = "Path to input bvh file", required = true)]
    pub input_path: String,
    #[arg(help = "Path to output bvh file", required = true)]
    pub output_path: String,
}

impl SubApp for StripNubsApp {
    fn process(&mut self) -> Result<(), Box<dyn Error>> {
        let doc = BvhDocument::load(&self.input_path)?;

        let nub_count = doc
            .tree()
            .iter_depth_first()
            .filter_map(|id| doc.tree().get(id))
            .filter(|n| !n.is_end_site() && is_finger_nub(&n.name))
            .count();

        let stripped = doc.strip_finger_nubs()?;
        stripped.save(&self.output_path)?;

        log::info!("Replaced {nub_count} finger nubs, wrote \"{}\"", self.output_path);
        Ok(())
    }
}
