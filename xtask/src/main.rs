use std::env;
use std::path::PathBuf;
use std::process::{Command, ExitCode};

fn repo_root() -> PathBuf {
    // xtask lives in `<repo>/xtask`; the repo root is its parent.
    let xtask_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    xtask_dir.parent().unwrap().to_path_buf()
}

fn run(cmd: &str, args: &[&str]) -> Result<(), String> {
    let mut c = Command::new(cmd);
    c.args(args).current_dir(repo_root());
    let status = c
        .status()
        .map_err(|e| format!("failed to spawn {cmd}: {e}"))?;
    if !status.success() {
        return Err(format!("command failed: {} {}", cmd, args.join(" ")));
    }
    Ok(())
}

fn print_usage() {
    eprintln!("xtask usage:\n  cargo xtask ci\n  cargo xtask demo\n  cargo xtask help");
}

fn main() -> ExitCode {
    let mut args = env::args().skip(1); // skip program name
    let cmd = args.next().unwrap_or_else(|| "help".to_string());

    let res = match cmd.as_str() {
        "ci" => task_ci(),
        "demo" => task_demo(),
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("unknown subcommand: {other}\n");
            print_usage();
            Err("unknown subcommand".into())
        }
    };

    match res {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
    }
}

fn task_ci() -> Result<(), String> {
    println!("Running CI checks (fmt, clippy, test, build)...");
    run("cargo", &["fmt", "--", "--check"])?;
    run("cargo", &["clippy", "--all-targets", "--", "-D", "warnings"])?;
    run("cargo", &["test"])?;
    run("cargo", &["build"])?;
    println!("CI checks passed");
    Ok(())
}

fn task_demo() -> Result<(), String> {
    run(
        "cargo",
        &["run", "--quiet", "--bin", "multispin", "--", "demo", "--fail", "2"],
    )
}
