use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use yamlsync::{init_logging, ProcessorArgs, Settings, SyncPipeline};

fn main() -> ExitCode {
    let args = ProcessorArgs::parse();

    if let Err(e) = init_logging(args.log_format) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    info!("Starting yaml-processor v{}", env!("CARGO_PKG_VERSION"));

    let settings = match Settings::from_args(args) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(async {
        let pipeline = SyncPipeline::from_settings(&settings)?;
        pipeline.run().await
    });

    match result {
        Ok(report) => {
            report.log_summary();
            if report.has_failures() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
