// ==========================================
// 销售看板 - 命令行入口
// ==========================================
// 用法:
//   sales-dashboard [--source <url|file>] [--year Y] [--seller NAME] [--month MES]
//                   [--export] [--csv] [--locale L] [--log-json]
//
// 拉取一次数据,应用筛选,以 JSON 输出筛选候选项与派生视图
// ==========================================

use std::process::ExitCode;

use anyhow::anyhow;
use sales_dashboard::api::{ApiError, DashboardApi, ErrorResponse};
use sales_dashboard::config::config_manager::DEFAULT_LOCALE;
use sales_dashboard::config::{config_keys, DashboardConfig};
use sales_dashboard::i18n::{self, t, t_with_args};
use sales_dashboard::source::source_from_location;
use sales_dashboard::{logging, APP_NAME, VERSION};

#[derive(Debug, Default)]
struct CliOptions {
    source: Option<String>,
    year: Option<String>,
    seller: Option<String>,
    month: Option<String>,
    export: bool,
    csv: bool,
    locale: Option<String>,
    log_json: bool,
    help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<CliOptions> {
    let mut options = CliOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value_for = |flag: &str| {
            args.next()
                .ok_or_else(|| anyhow!("{} requiere un valor", flag))
        };

        match arg.as_str() {
            "--source" => options.source = Some(value_for("--source")?),
            "--year" => options.year = Some(value_for("--year")?),
            "--seller" => options.seller = Some(value_for("--seller")?),
            "--month" => options.month = Some(value_for("--month")?),
            "--locale" => options.locale = Some(value_for("--locale")?),
            "--export" => options.export = true,
            "--csv" => options.csv = true,
            "--log-json" => options.log_json = true,
            "-h" | "--help" => options.help = true,
            other => return Err(anyhow!("argumento desconocido: {}", other)),
        }
    }

    Ok(options)
}

/// 帮助信息不依赖配置文件: 语言取 --locale、环境变量或默认值
fn print_usage(options: &CliOptions) {
    let locale = options
        .locale
        .clone()
        .or_else(|| std::env::var(config_keys::LOCALE).ok())
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    i18n::set_locale(&locale);
    println!("{}", t("cli.usage"));
}

/// 失败输出: stdout 为 ErrorResponse JSON,stderr 为本地化提示
fn report_failure(err: &anyhow::Error) {
    match err.downcast_ref::<ApiError>() {
        Some(api_err) => {
            let response = ErrorResponse::from(api_err);
            if let Ok(json) = serde_json::to_string_pretty(&response) {
                println!("{}", json);
            }
            eprintln!("{}", response.message);
        }
        None => eprintln!("{:#}", err),
    }
}

fn report_written(path: &std::path::Path) {
    let shown = path.display().to_string();
    eprintln!("{}", t_with_args("cli.export_written", &[("path", shown.as_str())]));
}

async fn run(options: CliOptions) -> anyhow::Result<()> {
    let config = DashboardConfig::load().map_err(|e| {
        let reason = e.to_string();
        anyhow!(t_with_args("error.config", &[("reason", reason.as_str())]))
    })?;
    i18n::set_locale(options.locale.as_deref().unwrap_or(&config.locale));

    tracing::info!("{} v{}", APP_NAME, VERSION);

    let location = options
        .source
        .clone()
        .unwrap_or_else(|| config.api_base_url.clone());
    let source = source_from_location(&location, &config).map_err(ApiError::from)?;

    let described = source.describe();
    eprintln!("{}", t("cli.title"));
    eprintln!("{}", t_with_args("cli.source", &[("source", described.as_str())]));

    let api = DashboardApi::new(source);
    let summary = api.refresh().await?;
    let count = summary.record_count.to_string();
    eprintln!("{}", t_with_args("cli.records_loaded", &[("count", count.as_str())]));

    if let Some(year) = options.year.as_deref() {
        api.set_year(year)?;
    }
    if let Some(seller) = options.seller.as_deref() {
        api.set_seller(seller)?;
    }
    if let Some(month) = options.month.as_deref() {
        api.set_month(month)?;
    }

    let output = serde_json::json!({
        "refresh": summary,
        "filters": api.filter_options(),
        "views": api.views(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    if options.export {
        let path = api.export_records(&config.export_dir)?;
        report_written(&path);
    }
    if options.csv {
        let (periods, sellers) = api.export_views_csv(&config.export_dir)?;
        report_written(&periods);
        report_written(&sellers);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("{}", t("cli.usage"));
            return ExitCode::FAILURE;
        }
    };

    if options.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    if options.help {
        print_usage(&options);
        return ExitCode::SUCCESS;
    }

    match run(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err);
            ExitCode::FAILURE
        }
    }
}
