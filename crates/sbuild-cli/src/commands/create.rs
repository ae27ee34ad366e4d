use std::path::PathBuf;

use sbuild_bundle::BundleAllocator;
use sbuild_core::SbuildConfig;

pub struct CreateArgs {
    pub prefix: String,
    pub sections: Vec<String>,
    /// `None` keeps the sbuild.toml value
    pub force: Option<bool>,
    pub update: Option<bool>,
    pub no_test: Option<bool>,
    pub bind_paths: Vec<PathBuf>,
    pub out: Option<PathBuf>,
}

pub fn create(args: CreateArgs) -> anyhow::Result<()> {
    let config = SbuildConfig::load(&PathBuf::from("."))?;

    // Command-line values replace sbuild.toml values; sections replace the whole list.
    let mut options = config.build;
    if !args.sections.is_empty() {
        options.sections = args.sections;
    }
    if let Some(force) = args.force {
        options.force = force;
    }
    if let Some(update) = args.update {
        options.update = update;
    }
    if let Some(no_test) = args.no_test {
        options.no_test = no_test;
    }

    let allocator = BundleAllocator::new().with_config(config.bundle);
    let mut bundle = allocator.create_with_options(&args.prefix, &options)?;
    for path in args.bind_paths {
        bundle.push_bind_path(path);
    }

    match args.out {
        Some(file) => {
            bundle.save(&file)?;
            println!("{}", bundle.path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&bundle)?),
    }
    Ok(())
}
