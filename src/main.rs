use clap::Parser;
use user_import_etl::core::submitter::DEFAULT_TIMEOUT;
use user_import_etl::core::ConfigProvider;
use user_import_etl::utils::error::ErrorSeverity;
use user_import_etl::utils::validation::Validate;
use user_import_etl::{ApiSubmitter, BatchOrchestrator, CliConfig, LogSink};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入並驗證配置
    let settings = match cli.load_settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(exit_code(e.severity()));
        }
    };

    // 初始化日誌
    let sink = LogSink::new(&settings.log_config())?;
    sink.install_global();

    tracing::debug!("Resolved settings: {:?}", settings);
    tracing::info!("Submitting accounts to {}", settings.api_endpoint());

    let submitter = ApiSubmitter::new(settings.api_endpoint(), DEFAULT_TIMEOUT);
    let orchestrator = BatchOrchestrator::new(submitter, sink.dispatch())
        .with_error_log(settings.log_file().display().to_string());

    let completed = orchestrator.run(settings.input_path()).await.is_some();

    sink.finish()?;

    if !completed {
        std::process::exit(exit_code(ErrorSeverity::High));
    }
    Ok(())
}

// 根據錯誤嚴重程度決定退出碼
fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
