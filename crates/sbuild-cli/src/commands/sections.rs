use std::path::Path;

use sbuild_bundle::Bundle;
use sbuild_bundle::sections::BUILD_PHASES;

pub fn should_run(
    section: &str,
    sections: Vec<String>,
    bundle_file: Option<&Path>,
) -> anyhow::Result<()> {
    let run = match bundle_file {
        Some(file) => {
            let bundle = Bundle::load(file)?;
            if section == "test" {
                bundle.run_test_section()
            } else {
                bundle.run_section(section)
            }
        }
        None => sbuild_bundle::should_run(section, &sections),
    };
    tracing::debug!(%section, run, "section gate");
    println!("{run}");
    Ok(())
}

pub fn plan(bundle_file: &Path) -> anyhow::Result<()> {
    let bundle = Bundle::load(bundle_file)?;
    for phase in bundle.section_gate().plan(BUILD_PHASES) {
        if phase == "test" && bundle.no_test {
            continue;
        }
        println!("{phase}");
    }
    Ok(())
}
