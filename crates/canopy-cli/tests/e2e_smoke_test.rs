use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use canopy_cli::{Args, Command, Emit, GenesArgs, IoArgs, MsaArgs, TreeArgs, run};

/// Demo documents live at the workspace root, relative to the workspace not the crate
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects every document in a directory, sorted for consistent output
fn collect_documents(dir: PathBuf) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect()
    } else {
        Vec::new()
    };

    files.sort();
    files
}

/// Picks the subcommand from the file name prefix (`tree_`, `genes_`, `msa_`)
fn args_for(input: &Path, output: PathBuf, emit: Emit) -> Args {
    let io = IoArgs {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        emit,
    };
    let name = input.file_name().unwrap().to_string_lossy().to_string();

    let command = if name.starts_with("tree_") {
        Command::Tree(TreeArgs {
            io,
            format: None,
            cladogram: false,
            support_values: true,
            shade_by_support: true,
            actions: Vec::new(),
        })
    } else if name.starts_with("genes_") {
        Command::Genes(GenesArgs {
            io,
            pan_min: 0.0,
            pan_max: 100.0,
            actions: Vec::new(),
        })
    } else if name.starts_with("msa_") {
        Command::Msa(MsaArgs {
            io,
            format: None,
            palette: None,
            cell_size: None,
            no_text: false,
            no_header: false,
        })
    } else {
        panic!("Demo file without a view prefix: {name}");
    };

    Args {
        command,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_documents(demos_dir());

    assert!(!demos.is_empty(), "No demos found in demos/");

    let mut failed = Vec::new();

    for demo in &demos {
        for emit in [Emit::Svg, Emit::Json] {
            let extension = if emit == Emit::Svg { "svg" } else { "json" };
            let output = temp_dir.path().join(format!(
                "{}.{extension}",
                demo.file_name().unwrap().to_string_lossy()
            ));

            match run(&args_for(demo, output.clone(), emit)) {
                Ok(()) => {
                    let written = fs::read_to_string(&output).unwrap();
                    if emit == Emit::Svg {
                        assert!(written.contains("<svg"), "{} is not SVG", output.display());
                    } else {
                        let parsed: Result<serde_json::Value, _> = serde_json::from_str(&written);
                        assert!(parsed.is_ok(), "{} is not JSON", output.display());
                    }
                }
                Err(e) => failed.push((demo.clone(), e)),
            }
        }
    }

    if !failed.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo run(s) failed unexpectedly", failed.len());
    }

    println!("✅ All {} valid demos passed", demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_documents(demos_dir().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo in &error_demos {
        let output = temp_dir.path().join(format!(
            "error_{}.svg",
            demo.file_name().unwrap().to_string_lossy()
        ));

        if run(&args_for(demo, output, Emit::Svg)).is_ok() {
            unexpectedly_succeeded.push(demo.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}

#[test]
fn e2e_invalid_pan_window_is_rejected() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_dir().join("genes_brca.json");

    let mut args = args_for(&input, temp_dir.path().join("genes.svg"), Emit::Svg);
    if let Command::Genes(genes) = &mut args.command {
        genes.pan_min = 80.0;
        genes.pan_max = 20.0;
    }

    assert!(run(&args).is_err());
}
