//! Local fixture generation

use anyhow::Result;
use copilot_lib::fixtures;
use std::path::Path;

use crate::output::print_success;

/// Write a fresh set of fixtures into `data_dir`
pub fn generate(data_dir: &Path, count: usize) -> Result<()> {
    fixtures::write_fixtures(data_dir, count, chrono::Utc::now())?;

    print_success(&format!(
        "Wrote {} alerts, {} resource configurations and fix templates to {}",
        count,
        fixtures::resource_configs().len(),
        data_dir.display()
    ));

    Ok(())
}
