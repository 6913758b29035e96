use crate::app::App;
use crate::error::GoenvCliError;
use crate::helpers::create_progress_bar;
use goenv_core::{
    Arch, GoEnvironment, InstallOptions, InstallOutcome, InstallWorkflow, Platform,
    expand_path, format_install_instructions, get_env_var,
};
use starbase_styles::color;
use std::env;
use tracing::{debug, info};

pub async fn install(args: App) -> miette::Result<()> {
    let working_dir = env::current_dir().map_err(GoenvCliError::MissingWorkingDir)?;
    let root = expand_path(&args.basedir, &working_dir);

    if root.exists() && !root.is_dir() {
        return Err(GoenvCliError::InvalidBaseDir { path: root }.into());
    }

    let mut goenv = GoEnvironment::new(&root);

    if args.no_verify {
        goenv.verify_checksums = false;
    }

    let options = InstallOptions {
        version: args.go_version.clone(),
        exclude: args.get_exclude_paths(&working_dir),
        install_only: args.install_only,
        platform: get_env_var("GOENV_PLATFORM")
            .map(|os| Platform::from_os(&os))
            .transpose()?,
        arch: get_env_var("GOENV_ARCH")
            .map(|arch| Arch::from_name(&arch))
            .transpose()?,
    };

    debug!(root = ?root, options = ?options, "Setting up Go environment");

    let pb = create_progress_bar("Downloading Go", args.quiet);
    let progress = pb.clone();
    let on_chunk = move |current: u64, total: u64| {
        if total > 0 {
            progress.set_length(total);
        }

        progress.set_position(current);
    };

    let outcome = InstallWorkflow::new(&goenv)?.run(options, &on_chunk).await;

    pb.finish_and_clear();

    match outcome? {
        InstallOutcome::Activated {
            script, version, ..
        } => {
            if args.quiet {
                println!("{}", script.display());
            } else {
                info!(
                    "Go {} environment created at {}",
                    color::hash(&version),
                    color::path(&goenv.root)
                );

                println!("Please use `source {}` to start using Go.", script.display());
            }
        }
        InstallOutcome::InstallOnly { goroot, .. } => {
            if args.quiet {
                println!("{}", goroot.display());
            } else {
                print!("{}", format_install_instructions(&goroot));
            }
        }
    };

    Ok(())
}
