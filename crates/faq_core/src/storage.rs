use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::model::FaqData;

pub fn load_faq_file(path: &Path) -> Result<FaqData> {
    let file = File::open(path)?;
    let data: FaqData = serde_json::from_reader(BufReader::new(file))?;
    debug!(path = %path.display(), entries = data.faqs.len(), "Loaded FAQ file");
    Ok(data)
}
