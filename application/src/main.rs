use std::{io, process::ExitCode, sync::OnceLock};

use application::{cli, view::Format, Args, Config, Context, Service};
use service::infra::Json;
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

fn main() -> ExitCode {
    // Standard output is reserved for the command results.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(false)
                .with_target(false)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || LOG_LEVEL
                            .get()
                            .copied()
                            .unwrap_or(log::Level::WARN)
                            >= *meta.level()
                })),
        )
        .init();

    let Args {
        config,
        json,
        command,
    } = match Args::parse() {
        Ok(args) => args,
        Err(e) => {
            _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    let Config {
        store,
        service,
        log,
    } = match Config::new(config) {
        Ok(config) => config,
        Err(e) => {
            log::error!("failed to load `Config`: {e}");
            return ExitCode::FAILURE;
        }
    };

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let service = Service::new(service.into(), Json::new(store.path));
    let format = if json { Format::Json } else { Format::Text };
    let mut ctx = Context::new(service, format);

    match cli::run(&mut ctx, command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(trace) = &e.backtrace {
                log::debug!("{e}\n{trace}");
            }
            eprintln!("{e}");
            ExitCode::from(e.exit_code)
        }
    }
}
