mod report;
mod watch;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use verdant_runtime::{CancelFlag, RegenOutcome, Regenerator};
use verdant_world::config::{GenConfig, load_config_from_path};

#[derive(Parser, Debug)]
#[command(name = "verdant", about = "Generate terrain and vegetation placements")]
struct Args {
    /// TOML config file; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Grid width in vertices
    #[arg(long)]
    width: Option<i32>,
    /// Grid height (depth) in vertices
    #[arg(long)]
    height: Option<i32>,
    /// Seed for terrain and vegetation noise
    #[arg(long)]
    seed: Option<i32>,
    /// Regenerate whenever the config file changes
    #[arg(long)]
    watch: bool,
    /// Cross-check the hashed scatter against the all-pairs path
    #[arg(long)]
    reference: bool,
    /// Width of the baked elevation colour ramp
    #[arg(long)]
    ramp_width: Option<usize>,
}

impl Args {
    fn load_config(&self) -> Result<GenConfig, Box<dyn Error>> {
        let mut cfg = match &self.config {
            Some(path) => {
                let cfg = load_config_from_path(path)?;
                log::info!("loaded config from {}", path.display());
                cfg
            }
            None => GenConfig::default(),
        };
        self.apply_overrides(&mut cfg);
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_overrides(&self, cfg: &mut GenConfig) {
        if let Some(w) = self.width {
            cfg.terrain.width = w;
        }
        if let Some(h) = self.height {
            cfg.terrain.height = h;
        }
        if let Some(seed) = self.seed {
            cfg.terrain.noise.seed = seed;
            cfg.vegetation.seed = seed;
        }
        if let Some(rw) = self.ramp_width {
            cfg.colour.ramp_width = rw;
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let cfg = args.load_config()?;
    let mut regen = Regenerator::new(cfg);
    let cancel = CancelFlag::new();

    if !args.watch {
        return generate(&mut regen, &cancel, &args);
    }
    let Some(path) = args.config.clone() else {
        return Err("--watch needs --config <path>".into());
    };
    let changes = watch::spawn_config_watcher(&path, cancel.clone());
    generate(&mut regen, &cancel, &args)?;
    log::info!("watching {} for changes", path.display());
    while changes.recv().is_ok() {
        // Coalesce bursts of editor writes into one reload
        for _ in changes.try_iter() {}
        cancel.clear();
        match load_config_from_path(&path) {
            Ok(mut cfg) => {
                args.apply_overrides(&mut cfg);
                regen.update_config(cfg);
                log::info!("config reloaded from {}", path.display());
            }
            Err(e) => {
                log::warn!("config reload failed ({}): {}", path.display(), e);
                continue;
            }
        }
        if let Err(e) = generate(&mut regen, &cancel, &args) {
            log::warn!("generation failed: {}", e);
        }
    }
    Ok(())
}

fn generate(
    regen: &mut Regenerator,
    cancel: &CancelFlag,
    args: &Args,
) -> Result<(), Box<dyn Error>> {
    match regen.run(cancel) {
        RegenOutcome::Completed(generation) => {
            if args.reference {
                report::cross_check(regen.config(), &generation)?;
            }
            report::print_summary(regen.config(), &generation);
        }
        RegenOutcome::Cancelled { after } => {
            log::info!("generation cancelled after {}; waiting for reload", after.name());
        }
    }
    Ok(())
}
