use std::process;
use log::{error, LevelFilter};

use scalekit::api::ScaleKit;
use scalekit::commands::{cli, CommandFactory, ScalekitCommandFactory};
use scalekit::config::EngineConfig;
use scalekit::utils::logger::Logger;

fn main() {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Warn };

    let logger = match matches.get_one::<String>("log-file") {
        Some(log_file) => {
            let logger = match Logger::new(log_file) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error initializing logger: {}", e);
                    process::exit(1);
                }
            };
            if let Err(e) = logger.init_global_logger(level) {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
            logger
        }
        None => {
            env_logger::Builder::new().filter_level(level).parse_default_env().init();
            Logger::disabled()
        }
    };

    let config = match matches.get_one::<String>("config") {
        Some(path) => EngineConfig::from_file(path),
        None => Ok(EngineConfig::default()),
    };

    let kit = match config.and_then(ScaleKit::with_config) {
        Ok(kit) => kit,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let factory = ScalekitCommandFactory::new();

    let command_result = factory.create_command(&matches, &kit, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
