use std::path::Path;

use sbuild_bundle::Bundle;

pub fn rootfs(bundle_file: &Path) -> anyhow::Result<()> {
    let bundle = Bundle::load(bundle_file)?;
    println!("{}", bundle.rootfs()?.display());
    Ok(())
}

pub fn resolve(bundle_file: &Path, label: &str) -> anyhow::Result<()> {
    let bundle = Bundle::load(bundle_file)?;
    println!("{}", bundle.resolve(label)?.display());
    Ok(())
}
