//! CLI [`Command`]s execution.

mod month;
mod params;
mod sale;
mod store;

use std::io;

use crate::{args::Command, define_error, Context, Error};

define_error! {
    enum MonthError {
        #[code = "MONTH_CLOSED"]
        #[exit = 3]
        #[message = "Month is closed and cannot be modified"]
        Closed,

        #[code = "MONTH_NOT_FOUND"]
        #[exit = 4]
        #[message = "Month does not exist"]
        NotFound,
    }
}

/// Executes the provided [`Command`] printing its output into the
/// [`Context`].
///
/// # Errors
///
/// If the [`Command`] fails.
pub fn run<Out: io::Write>(
    ctx: &mut Context<Out>,
    command: Command,
) -> Result<(), Error> {
    match command {
        Command::Month { id } => month::show_or_select(ctx, id),
        Command::Sale(cmd) => sale::run(ctx, cmd),
        Command::Params(cmd) => params::run(ctx, cmd),
        Command::Quality { score } => month::set_quality_score(ctx, score),
        Command::Summary { id } => month::summary(ctx, id),
        Command::Close => month::close(ctx),
        Command::History => month::history(ctx),
        Command::Export { path } => store::export(ctx, path.as_deref()),
        Command::Import { path } => store::import(ctx, &path),
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use std::{fs, path::PathBuf};

    use clap::Parser as _;
    use service::infra::Json;

    use crate::{view::Format, Args, Context, Error, Service};

    /// Temporary CLI environment backed by a JSON file.
    pub(crate) struct Env {
        /// Directory holding the JSON file.
        pub(crate) dir: PathBuf,
    }

    impl Env {
        pub(crate) fn new() -> Self {
            let dir = std::env::temp_dir()
                .join(format!("comis-cli-{}", unique_suffix()));
            fs::create_dir_all(&dir).unwrap();
            Self { dir }
        }

        pub(crate) fn store_path(&self) -> PathBuf {
            self.dir.join("store.json")
        }

        /// Runs the provided CLI `args`, returning the printed output.
        pub(crate) fn run(&self, args: &[&str]) -> Result<String, Error> {
            let Args { json, command, .. } =
                Args::try_parse_from(["comis"].iter().chain(args)).unwrap();
            let service = Service::new(
                service::Config::default(),
                Json::new(self.store_path()),
            );
            let format = if json { Format::Json } else { Format::Text };
            let mut ctx = Context::with_output(service, format, vec![]);

            super::run(&mut ctx, command)?;

            Ok(String::from_utf8(ctx.output().clone()).unwrap())
        }
    }

    impl Drop for Env {
        fn drop(&mut self) {
            _ = fs::remove_dir_all(&self.dir);
        }
    }

    fn unique_suffix() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        format!("{}-{nanos}", std::process::id())
    }

    #[test]
    fn full_month_lifecycle() {
        let env = Env::new();
        _ = env.run(&["month", "2024-05"]).unwrap();
        for price in ["121000", "60500"] {
            _ = env
                .run(&[
                    "sale", "add", "--client", "Ana", "--model", "Yaris",
                    "--price", price, "--date", "2024-05-10",
                ])
                .unwrap();
        }

        let err = env.run(&["close"]).unwrap_err();
        assert_eq!(err.code, "CLOSE_PRECONDITIONS_UNMET");
        assert_eq!(err.exit_code, 3);

        _ = env.run(&["quality", "4.7"]).unwrap();
        let closed = env.run(&["close"]).unwrap();
        assert!(closed.starts_with("Month 2024-05 (closed, active)"));

        let err = env
            .run(&[
                "sale", "add", "--client", "B", "--model", "C", "--price", "1",
            ])
            .unwrap_err();
        assert_eq!(err.code, "MONTH_CLOSED");

        let history = env.run(&["history", "--json"]).unwrap();
        let history = serde_json::from_str::<serde_json::Value>(&history)
            .unwrap();
        assert_eq!(history[0]["monthId"], "2024-05");
        assert_eq!(history[0]["totalUnits"], 2);
    }

    #[test]
    fn new_month_inherits_parameters() {
        let env = Env::new();
        _ = env.run(&["month", "2024-05"]).unwrap();
        _ = env.run(&["params", "rate", "0.01"]).unwrap();

        _ = env.run(&["month", "2024-06"]).unwrap();
        let params = env.run(&["params", "show", "--json"]).unwrap();

        let params = serde_json::from_str::<serde_json::Value>(&params)
            .unwrap();
        assert_eq!(params["baseCommissionRate"], "0.01");
    }

    #[test]
    fn reports_unknown_month() {
        let env = Env::new();

        let err = env.run(&["summary", "1990-01"]).unwrap_err();

        assert_eq!(err.code, "MONTH_NOT_FOUND");
        assert_eq!(err.exit_code, 4);
    }
}
