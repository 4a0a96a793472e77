// Tue Jan 13 2026 - Alex

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use ue_profile_dumper::{
    config::Config,
    memory::{Address, ProcessMemory},
    output::{Anchors, DumpReport},
    profile::{GameProfile, ProfileRegistry},
    target::{AttachedTarget, Target},
    utils::logging::{scoped_timer, LoggingUtils},
    walker,
};

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version)]
#[command(about = "Resolves UE4 globals for supported Android titles", long_about = None)]
struct Args {
    /// Android package id of the running game
    #[arg(short, long)]
    package: Option<String>,

    #[arg(long)]
    pid: Option<i32>,

    /// Scan a pulled libUE4.so instead of a live process
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Base address the image is laid out at
    #[arg(long, value_parser = parse_address, requires = "image")]
    load_bias: Option<u64>,

    #[arg(long, conflicts_with = "device")]
    emulator: bool,

    #[arg(long)]
    device: bool,

    #[arg(long)]
    ue_library: Option<String>,

    /// Name the first N objects once both globals are found
    #[arg(long)]
    sample: Option<usize>,

    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    compact: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(long)]
    no_progress: bool,

    #[arg(long)]
    list_profiles: bool,
}

fn parse_address(s: &str) -> Result<u64, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u64::from_str_radix(digits, 16).map_err(|e| format!("bad address {}: {}", s, e))
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_profiles {
        for profile in ProfileRegistry::builtin().profiles() {
            println!("{} {}", profile.app_name().cyan(), profile.app_ids().join(", "));
        }
        return Ok(());
    }

    let config = build_config(&args)?;
    LoggingUtils::init_logger(LoggingUtils::level_from_verbosity(config.verbosity));
    config.validate()?;

    println!("{}", "UE Profile Dumper".cyan().bold());
    println!("{}", "=".repeat(50).cyan());

    let start_time = Instant::now();
    let profile = select_profile(&config)?;
    println!("{} Profile: {}", "[*]".blue(), profile.app_name());

    let options = config.attach_options();
    let target = if let Some(image) = &config.image {
        println!("{} Loading image: {}", "[*]".blue(), image.display());
        AttachedTarget::open_image(image, config.load_bias, &options)
            .with_context(|| format!("failed to load {}", image.display()))?
    } else if let Some(pid) = config.pid {
        AttachedTarget::attach_pid(pid, &options)
            .with_context(|| format!("failed to attach to pid {}", pid))?
    } else {
        let package = config.package.as_deref().unwrap_or_default();
        AttachedTarget::attach_package(package, &options)
            .with_context(|| format!("failed to attach to {}", package))?
    };

    println!(
        "{} Attached: {} regions, emulator={}",
        "[+]".green(),
        target.regions().len(),
        target.is_emulator()
    );
    if let Some(base) = target.ue_base() {
        println!("{} {} at {}", "[+]".green(), config.ue_library, base);
    }

    let arch_supported = profile.arch_supported(&target);
    if !arch_supported {
        bail!("{} only supports arm64 targets", profile.app_name());
    }

    let anchors = resolve_anchors(profile, &target, !args.no_progress);
    print_anchor("GUObjectArray", anchors.guobject_array);
    print_anchor("NamePoolData", anchors.name_pool_data);

    let mut report = DumpReport::new(profile, anchors);
    report.package = config.package.clone();
    report.arch_supported = arch_supported;
    report.emulator = target.is_emulator();
    report.ue_base = target.ue_base();

    if config.sample > 0 && anchors.all_resolved() {
        match walker::sample_objects(
            target.reader().as_ref(),
            profile.offsets(),
            anchors.guobject_array,
            anchors.name_pool_data,
            config.sample,
        ) {
            Ok(objects) => {
                for object in &objects {
                    println!(
                        "    [{:>6}] {} {}",
                        object.index,
                        object.class.as_deref().unwrap_or("?").yellow(),
                        object.name
                    );
                }
                report.objects = objects;
            }
            Err(e) => eprintln!("{} Object walk failed: {}", "[!]".red(), e),
        }
    }

    match &config.output_file {
        Some(path) => {
            report
                .write_to_file(path, config.pretty)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{} Results saved to: {}", "[+]".green(), path.display());
        }
        None => println!("{}", report.to_json(config.pretty)?),
    }

    println!("{}", "=".repeat(50).cyan());
    println!(
        "{} Done in {:.2}s",
        "[+]".green(),
        start_time.elapsed().as_secs_f64()
    );

    if !anchors.all_resolved() {
        bail!("not every global was resolved");
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::new(),
    };

    if let Some(package) = &args.package {
        config.package = Some(package.clone());
    }
    if let Some(pid) = args.pid {
        config.pid = Some(pid);
    }
    if let Some(image) = &args.image {
        config.image = Some(image.clone());
    }
    if let Some(bias) = args.load_bias {
        config.load_bias = bias;
    }
    if let Some(lib) = &args.ue_library {
        config.ue_library = lib.clone();
    }
    if args.emulator {
        config.emulator = Some(true);
    } else if args.device {
        config.emulator = Some(false);
    }
    if let Some(sample) = args.sample {
        config.sample = sample;
    }
    if let Some(output) = &args.output {
        config.output_file = Some(output.clone());
    }
    if args.compact {
        config.pretty = false;
    }
    if args.verbose > 0 {
        config.verbosity = args.verbose as usize;
    }

    Ok(config)
}

/// By package id when one is known, else the only built-in profile.
fn select_profile(config: &Config) -> Result<&'static GameProfile> {
    let registry = ProfileRegistry::builtin();

    let package = match (&config.package, config.pid) {
        (Some(package), _) => Some(package.clone()),
        (None, Some(pid)) => ProcessMemory::attach(pid)?.process_name(),
        (None, None) => None,
    };

    match package {
        Some(package) => registry
            .find_by_app_id(&package)
            .ok_or_else(|| anyhow!("no profile for package {}", package)),
        None => {
            let mut profiles = registry.profiles();
            match (profiles.next(), profiles.next()) {
                (Some(only), None) => Ok(only),
                _ => bail!("cannot tell which profile applies, pass --package"),
            }
        }
    }
}

fn resolve_anchors(profile: &GameProfile, target: &dyn Target, progress: bool) -> Anchors {
    let spinner = progress.then(|| {
        let pb = ProgressBar::new_spinner();
        let template = "{spinner:.green} [{elapsed_precise}] {msg}";
        if let Ok(style) = ProgressStyle::default_spinner().template(template) {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let _timer = scoped_timer("anchor resolution");

    if let Some(pb) = &spinner {
        pb.set_message("Scanning for GUObjectArray...");
    }
    let guobject_array = profile.global_uobject_array_address(target);

    if let Some(pb) = &spinner {
        pb.set_message("Scanning for NamePoolData...");
    }
    let name_pool_data = profile.global_name_pool_address(target);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    Anchors {
        guobject_array,
        name_pool_data,
    }
}

fn print_anchor(label: &str, address: Address) {
    if address.is_null() {
        println!("{} {}: {}", "[!]".red(), label, "not found".red());
    } else {
        println!("{} {}: {}", "[+]".green(), label, address.to_string().green());
    }
}
