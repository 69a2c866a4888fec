use anyhow::{Context, Result};
use multispin::{Animation, Spinner, SpinnerConfig, SpinnerManager};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;

pub struct DemoOptions {
    pub count: usize,
    pub steps: u32,
    pub animation: Option<Animation>,
    pub frame_ms: Option<u64>,
    pub fail: Vec<usize>,
    pub config: Option<PathBuf>,
    pub no_color: bool,
}

pub async fn handle_demo(options: DemoOptions) -> Result<()> {
    let config = match &options.config {
        Some(path) => SpinnerConfig::load(path)
            .with_context(|| format!("Failed to load spinner config from {}", path.display()))?,
        None => SpinnerConfig::default(),
    };

    let color = !options.no_color && atty::is(atty::Stream::Stdout);

    let mut builder = SpinnerManager::builder().with_config(&config);
    if let Some(animation) = options.animation {
        builder = builder.with_animation(animation);
    }
    if let Some(ms) = options.frame_ms {
        builder = builder.with_frame_duration(Duration::from_millis(ms));
    }
    if !color {
        builder = builder.without_colors();
    }
    let manager = builder.build().context("Invalid spinner configuration")?;

    let mut workers = Vec::with_capacity(options.count);
    for index in 0..options.count {
        let spinner = manager.add_spinner(format!("Task {} queued", index + 1));
        let fail = options.fail.contains(&(index + 1));
        workers.push(tokio::spawn(run_task(
            spinner,
            index,
            options.count,
            options.steps,
            fail,
        )));
    }

    manager.init();
    for worker in workers {
        worker.await.context("Demo task panicked")?;
    }
    manager.stop().await;

    let spinners = manager.get_spinners();
    let failed = spinners.iter().filter(|s| s.is_error()).count();
    let passed = spinners.len() - failed;

    println!();
    if !color {
        println!("{} completed, {} failed", passed, failed);
    } else if failed == 0 {
        println!("{} {} tasks completed", "✔".green().bold(), passed);
    } else {
        println!(
            "{} {} completed, {} failed",
            "✖".red().bold(),
            passed,
            failed
        );
    }

    Ok(())
}

async fn run_task(spinner: Spinner, index: usize, total: usize, steps: u32, fail: bool) {
    spinner.update_prefix_fmt(format_args!("[{}/{}] ", index + 1, total));

    for step in 1..=steps {
        sleep(step_delay(index)).await;
        spinner.update_message_fmt(format_args!("Task {} step {}/{}", index + 1, step, steps));
    }

    if fail {
        spinner.error_with_message_fmt(format_args!("Task {} failed at step {}", index + 1, steps));
    } else {
        spinner.complete_with_message_fmt(format_args!("Task {} done", index + 1));
    }
}

/// Staggered so the spinners finish at different times.
fn step_delay(index: usize) -> Duration {
    Duration::from_millis(300 + 150 * (index as u64 % 4))
}
