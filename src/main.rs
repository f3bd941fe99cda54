// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;

use cc_blocks::config::{self, SiteConfig};
use cc_blocks::diagnostics::DiagnosticsCollector;
use cc_blocks::domain::slot::SlotConfig;
use cc_blocks::i18n::I18n;
use cc_blocks::locale::LocaleResolver;
use cc_blocks::slot_text::{self, ControlLabels, SlotMarkup};
use cc_blocks::terms::{self, HttpTransport, PageAction, TermsFetcher, TermsHost};

const USAGE: &str = "\
Usage: cc-blocks [--config <path>] [--lang <tag>] [--diagnostics] <command>

Commands:
  locale <lang_COUNTRY>             Resolve a page locale
  terms <?search> [--host <name>]   Fetch promo terms and print the page action
  slot --items <A,B,C> [--prefix <text>] [--duration <ms>] [--wait <ms>]
       [--height <px>] [--reduced-motion]
                                    Print the markup and animation timeline";

/// Item height used for simulated timelines.
const DEFAULT_ITEM_HEIGHT_PX: f32 = 40.0;

struct GlobalArgs {
    config: Option<PathBuf>,
    lang: Option<String>,
    diagnostics: bool,
}

enum Command {
    Locale(String),
    Terms {
        search: String,
        host: String,
    },
    Slot {
        config: SlotConfig,
        reduced_motion: bool,
        item_height: f32,
    },
}

fn parse_args() -> Result<(GlobalArgs, Command), pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    let global = GlobalArgs {
        config: args.opt_value_from_str("--config")?,
        lang: args.opt_value_from_str("--lang")?,
        diagnostics: args.contains("--diagnostics"),
    };

    let command = match args.subcommand()?.as_deref() {
        Some("locale") => Command::Locale(args.free_from_str()?),
        Some("terms") => {
            let host = args
                .opt_value_from_str("--host")?
                .unwrap_or_else(|| config::PRODUCTION_HOSTNAME.to_string());
            Command::Terms {
                search: args.free_from_str()?,
                host,
            }
        }
        Some("slot") => {
            let items: String = args.value_from_str("--items")?;
            let config = SlotConfig {
                prefix: args.opt_value_from_str("--prefix")?.unwrap_or_default(),
                items: items
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_owned)
                    .collect(),
                total_duration_ms: args.opt_value_from_str("--duration")?,
                initial_wait_ms: args.opt_value_from_str("--wait")?,
                prefix_color: None,
                slot_color: None,
            };
            Command::Slot {
                config,
                reduced_motion: args.contains("--reduced-motion"),
                item_height: args
                    .opt_value_from_str("--height")?
                    .unwrap_or(DEFAULT_ITEM_HEIGHT_PX),
            }
        }
        Some(other) => {
            return Err(pico_args::Error::ArgumentParsingFailed {
                cause: format!("unknown command '{other}'"),
            })
        }
        None => return Err(pico_args::Error::MissingArgument),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected arguments: {rest:?}"),
        });
    }
    Ok((global, command))
}

/// Terms host that reports to the console instead of a page.
struct ConsoleHost {
    hostname: String,
}

impl TermsHost for ConsoleHost {
    fn hostname(&self) -> &str {
        &self.hostname
    }

    fn inner_html(&self) -> String {
        String::new()
    }

    fn navigate(&mut self, url: &str) {
        println!("navigate: {url}");
    }

    fn sanitize(&self, html: &str) -> String {
        // Printed, never inserted into a document.
        html.to_owned()
    }

    fn replace_children(&mut self, html: String) {
        println!("render: {html}");
    }
}

fn load_site_config(path: Option<&PathBuf>) -> cc_blocks::error::Result<SiteConfig> {
    match path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let (global, command) = match parse_args() {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&global, command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(global: &GlobalArgs, command: Command) -> cc_blocks::error::Result<()> {
    let site = load_site_config(global.config.as_ref())?;
    let resolver = LocaleResolver::from_config(&site.locale)?;
    let mut collector = DiagnosticsCollector::default();

    match command {
        Command::Locale(param) => {
            let resolved = resolver.resolve(Some(&param));
            println!("ietf:   {}", resolved.ietf);
            println!("prefix: {}", resolved.prefix);
        }
        Command::Terms { search, host } => {
            let fetcher =
                TermsFetcher::from_config(HttpTransport::new()?, &site, resolver, collector.handle());
            let mut console = ConsoleHost { hostname: host };
            if terms::init(&fetcher, &mut console, &search).await == PageAction::Nothing {
                println!("nothing rendered");
            }
        }
        Command::Slot {
            config,
            reduced_motion,
            item_height,
        } => {
            let labels = ControlLabels::from_i18n(&I18n::new(global.lang.as_deref()));
            let markup = SlotMarkup::build(&config, &site.slot, reduced_motion, &labels, "");
            println!("{}\n", markup.to_html());
            let timeline = slot_text::simulate(
                &config,
                &site.slot,
                reduced_motion,
                labels,
                item_height,
                collector.handle(),
            );
            print!("{timeline}");
        }
    }

    if global.diagnostics {
        collector.process_pending();
        match collector.export_json() {
            Ok(json) => eprintln!("{json}"),
            Err(err) => log::warn!("could not export diagnostics: {err}"),
        }
    }
    Ok(())
}
