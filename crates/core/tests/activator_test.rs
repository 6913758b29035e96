use goenv_core::{
    EnvironmentMaterializer, GoEnvironment, find_gopath_entries, format_install_instructions,
};
use starbase_sandbox::create_empty_sandbox;
use std::fs;
use std::path::PathBuf;

mod materializer {
    use super::*;

    #[test]
    fn writes_activation_script() {
        let sandbox = create_empty_sandbox();
        let env = GoEnvironment::from(sandbox.path().join("myenv"));
        let install_dir = env.dists_dir.join("1.20");

        let script = EnvironmentMaterializer::new(&env)
            .materialize(&install_dir, "1.20", &[])
            .unwrap();

        assert_eq!(script, env.root.join("bin/activate"));

        let content = fs::read_to_string(&script).unwrap();
        let root = env.root.display();

        assert!(content.contains(&format!(
            "GOROOT=\"{root}/.config-home/dists/1.20/go\""
        )));
        assert!(content.contains(&format!("GOPATH=\"{root}\"")));
        assert!(content.contains(&format!("GOBIN=\"{root}/bin\"")));
        assert!(content.contains(&format!("GOCACHE=\"{root}/.config-home/cache\"")));
        assert!(content.contains("GOENV_VERSION=\"1.20\""));
        assert!(content.contains("PS1=\"(myenv) ${PS1:-}\""));
        assert!(content.contains("deactivate () {"));
        assert!(content.contains("deactivate nondestructive"));
    }

    #[test]
    fn includes_extra_paths_in_gopath() {
        let sandbox = create_empty_sandbox();
        let env = GoEnvironment::from(sandbox.path());
        let extra = vec![sandbox.path().join("a"), sandbox.path().join("b")];

        let context = EnvironmentMaterializer::new(&env)
            .create_context(&env.dists_dir.join("1.20"), "1.20", &extra)
            .unwrap();

        let separator = if cfg!(windows) { ";" } else { ":" };

        assert_eq!(
            context.gopath,
            [env.root.clone(), extra[0].clone(), extra[1].clone()]
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(separator)
        );
    }

    #[test]
    fn escapes_shell_characters() {
        let sandbox = create_empty_sandbox();
        let env = GoEnvironment::from(sandbox.path().join("my $env"));

        let context = EnvironmentMaterializer::new(&env)
            .create_context(&env.dists_dir.join("1.20"), "1.20", &[])
            .unwrap();

        assert!(context.gopath.ends_with("my \\$env"));
        assert_eq!(context.prompt, "my _env");
    }

    #[test]
    fn strips_prompt_expansions_from_label() {
        let sandbox = create_empty_sandbox();

        for (name, label) in [
            ("$(touch owned)", "__touch owned_"),
            ("`id`", "_id_"),
            ("go-1.20_env", "go-1.20_env"),
        ] {
            let env = GoEnvironment::from(sandbox.path().join(name));
            let context = EnvironmentMaterializer::new(&env)
                .create_context(&env.dists_dir.join("1.20"), "1.20", &[])
                .unwrap();

            assert_eq!(context.prompt, label);
        }

        let env = GoEnvironment::from(sandbox.path().join("$(touch owned)"));
        let script = EnvironmentMaterializer::new(&env)
            .materialize(&env.dists_dir.join("1.20"), "1.20", &[])
            .unwrap();

        assert!(
            fs::read_to_string(script)
                .unwrap()
                .contains("PS1=\"(__touch owned_) ${PS1:-}\"")
        );
    }

    #[test]
    fn overwrites_previous_script() {
        let sandbox = create_empty_sandbox();
        let env = GoEnvironment::from(sandbox.path());
        let materializer = EnvironmentMaterializer::new(&env);

        sandbox.create_file("bin/activate", "old");

        let script = materializer
            .materialize(&env.dists_dir.join("1.21.0"), "1.21.0", &[])
            .unwrap();
        let first = fs::read_to_string(&script).unwrap();

        materializer
            .materialize(&env.dists_dir.join("1.21.0"), "1.21.0", &[])
            .unwrap();

        assert!(first.contains("GOENV_VERSION=\"1.21.0\""));
        assert_eq!(fs::read_to_string(&script).unwrap(), first);
    }

    #[cfg(unix)]
    #[test]
    fn activates_and_deactivates_in_shell() {
        use std::process::Command;

        let sandbox = create_empty_sandbox();
        let env = GoEnvironment::from(sandbox.path());
        let script = EnvironmentMaterializer::new(&env)
            .materialize(&env.dists_dir.join("1.20"), "1.20", &[])
            .unwrap();

        let output = Command::new("sh")
            .arg("-c")
            .arg(format!(
                r#". "{}"; echo "$GOROOT"; echo "$PATH"; deactivate; echo "$PATH"; echo "${{GOROOT:-unset}}"; echo "${{GOPATH:-unset}}""#,
                script.display()
            ))
            .env("PATH", "/usr/bin:/bin")
            .env_remove("GOPATH")
            .env_remove("GOROOT")
            .env_remove("GOENV_VERSION")
            .output()
            .unwrap();

        let stdout = String::from_utf8_lossy(&output.stdout);
        let lines = stdout.lines().collect::<Vec<_>>();
        let goroot = env.dists_dir.join("1.20/go");

        assert!(output.status.success());
        assert_eq!(lines[0], goroot.display().to_string());
        assert!(lines[1].starts_with(&format!(
            "{}:{}/bin:",
            env.bin_dir.display(),
            goroot.display()
        )));
        assert_eq!(lines[2], "/usr/bin:/bin");
        assert_eq!(lines[3], "unset");
        assert_eq!(lines[4], "unset");
    }
}

mod gopath_entries {
    use super::*;

    #[test]
    fn finds_workspaces_with_src() {
        let sandbox = create_empty_sandbox();

        sandbox.create_file("beta/src/main.go", "");
        sandbox.create_file("alpha/src/main.go", "");
        sandbox.create_file("nosrc/main.go", "");
        sandbox.create_file(".hidden/src/main.go", "");
        sandbox.create_file("file.txt", "");

        let entries = find_gopath_entries(sandbox.path(), &[]).unwrap();

        assert_eq!(
            entries,
            vec![sandbox.path().join("alpha"), sandbox.path().join("beta")]
        );
    }

    #[test]
    fn skips_excluded_paths() {
        let sandbox = create_empty_sandbox();

        sandbox.create_file("alpha/src/main.go", "");
        sandbox.create_file("beta/src/main.go", "");

        let entries =
            find_gopath_entries(sandbox.path(), &[sandbox.path().join("alpha")]).unwrap();

        assert_eq!(entries, vec![sandbox.path().join("beta")]);
    }

    #[test]
    fn returns_empty_for_missing_root() {
        let sandbox = create_empty_sandbox();

        assert_eq!(
            find_gopath_entries(&sandbox.path().join("missing"), &[]).unwrap(),
            Vec::<PathBuf>::new()
        );
    }
}

mod install_instructions {
    use super::*;

    #[test]
    fn formats_exports_per_shell() {
        let output = format_install_instructions(&PathBuf::from("/envs/go/dists/1.20/go"));

        assert!(output.starts_with(
            "Go installed, run the following commands (for your shell) to start using Go."
        ));
        assert!(output.contains("    export GOROOT=/envs/go/dists/1.20/go\n"));
        assert!(output.contains("    export PATH=\"/envs/go/dists/1.20/go/bin:${PATH}\"\n"));
        assert!(output.contains("    setenv GOROOT /envs/go/dists/1.20/go\n"));
        assert!(output.contains("    setenv PATH /envs/go/dists/1.20/go/bin:$PATH\n"));
        assert!(output.contains("    set -xg GOROOT /envs/go/dists/1.20/go\n"));
        assert!(output.contains("    set -xg PATH /envs/go/dists/1.20/go/bin $PATH\n"));
    }
}
