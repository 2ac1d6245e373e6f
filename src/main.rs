mod cli;

use cli::{AlertsCommand, Args, Command, KeyCommand};
use recon_dashboard::adapters::outbound::console::StderrProgressReporter;
use recon_dashboard::adapters::outbound::filesystem::{FileSystemReader, KeyFileStore};
use recon_dashboard::adapters::outbound::formatters::{ListingFormatter, TerminalFormatter};
use recon_dashboard::adapters::outbound::network::{
    HttpBackendClient, PublicServicesClient, API_BASE_ENV, DEFAULT_API_BASE,
};
use recon_dashboard::application::dto::{
    OutputFormat, ReportView, ResultSource, RunRequest, RunStatus, Session,
};
use recon_dashboard::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use recon_dashboard::application::read_models::DashboardReadModel;
use recon_dashboard::application::use_cases::{
    DocumentAnalyzer, ExportReportUseCase, InspectAccountUseCase, ManageAlertsUseCase,
    RunScriptUseCase, UploadResultUseCase, ViewResultUseCase,
};
use recon_dashboard::config::{self, ConfigFile};
use recon_dashboard::ports::outbound::{KeyStore, ProgressReporter};
use recon_dashboard::shared::error::{DashboardError, ExitCode};
use recon_dashboard::shared::Result;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .format_timestamp(None)
        .init();

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }
            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Everything resolved from flags, environment and the config file
struct Context {
    api_base: String,
    key_path: Option<PathBuf>,
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    output: Option<PathBuf>,
    config: ConfigFile,
}

impl Context {
    fn resolve(args: &Args) -> Result<Self> {
        let config = match &args.config {
            Some(path) => config::load_config_from_path(path)?,
            None => config::discover_config(&std::env::current_dir()?)?.unwrap_or_default(),
        };

        let format = match args.format {
            Some(format) => format,
            None => config
                .format
                .as_deref()
                .map(str::parse::<OutputFormat>)
                .transpose()
                .map_err(|message| DashboardError::Validation { message })?
                .unwrap_or_default(),
        };

        let api_base = args
            .api_base
            .clone()
            .or_else(|| std::env::var(API_BASE_ENV).ok().filter(|v| !v.trim().is_empty()))
            .or_else(|| config.api_base.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let key_path = args
            .key_file
            .clone()
            .or_else(|| config.key_file.clone())
            .or_else(KeyFileStore::default_path);

        log::debug!("backend: {}, format: {}", api_base, format);

        Ok(Self {
            api_base,
            key_path,
            format,
            use_color: !args.no_color && TerminalFormatter::color_supported(),
            quiet: args.quiet,
            output: args.output.clone(),
            config,
        })
    }

    fn progress(&self) -> StderrProgressReporter {
        if self.quiet {
            StderrProgressReporter::quiet()
        } else {
            StderrProgressReporter::new()
        }
    }

    fn analyzer(&self) -> DocumentAnalyzer {
        DocumentAnalyzer::new(&self.config.analysis_options())
    }

    fn backend(&self) -> Result<HttpBackendClient> {
        HttpBackendClient::new(&self.api_base)
    }

    fn key_store(&self) -> Result<KeyFileStore> {
        self.key_path
            .clone()
            .map(KeyFileStore::new)
            .ok_or_else(|| {
                DashboardError::Validation {
                    message: "no home directory found for the key file; pass --key-file"
                        .to_string(),
                }
                .into()
            })
    }

    /// `--api-key` wins over the stored key
    fn session(&self, args: &Args) -> Result<Session> {
        if let Some(key) = &args.api_key {
            return Ok(Session::new(Some(key.clone())));
        }
        match &self.key_path {
            Some(path) => Ok(Session::new(KeyFileStore::new(path.clone()).load_key()?)),
            None => Ok(Session::default()),
        }
    }

    fn listing(&self) -> ListingFormatter {
        ListingFormatter::new(self.format)
    }

    fn present(&self, content: &str) -> Result<()> {
        PresenterFactory::create(PresenterType::from_output(self.output.clone())).present(content)
    }

    fn present_model(&self, model: &DashboardReadModel) -> Result<()> {
        self.progress()
            .report(FormatterFactory::progress_message(self.format));
        let formatter = FormatterFactory::create(self.format, self.use_color);
        self.present(&formatter.format(model)?)
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let ctx = Context::resolve(&args)?;

    match &args.command {
        Command::List => {
            let use_case = view_use_case(&ctx)?;
            let results = use_case.list().await?;
            ctx.present(&ctx.listing().results(&results)?)?;
        }
        Command::View(source) => {
            show_result(&ctx, &source.source(), ReportView::Dashboard).await?
        }
        Command::Vulns(source) => {
            show_result(&ctx, &source.source(), ReportView::Vulnerabilities).await?
        }
        Command::Upload { file, show } => {
            let use_case =
                UploadResultUseCase::new(ctx.backend()?, FileSystemReader::new(), ctx.progress());
            let receipt = use_case.execute(file).await?;
            if *show {
                ctx.progress()
                    .report_completion(&format!("✅ Uploaded to {}", receipt.path));
                let source = ResultSource::Backend(receipt.path.clone());
                show_result(&ctx, &source, ReportView::Dashboard).await?;
            } else {
                ctx.present(&ctx.listing().upload(&receipt)?)?;
            }
        }
        Command::Scripts => {
            let use_case = RunScriptUseCase::new(ctx.backend()?, ctx.progress(), ctx.analyzer());
            let catalog = use_case.catalog().await?;
            ctx.present(&ctx.listing().scripts(&catalog)?)?;
        }
        Command::Run { script, params } => {
            let session = ctx.session(&args)?;
            return run_script(&ctx, &session, RunRequest::new(script.clone(), params.clone()))
                .await;
        }
        Command::Export { source, name } => {
            let loaded = view_use_case(&ctx)?.load(&source.source()).await?;
            let report_name = name.as_deref().or(Some(loaded.name.as_str()));
            let export =
                ExportReportUseCase::new(ctx.analyzer()).execute(report_name, loaded.document)?;
            let destination = ctx
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(&export.file_name));
            PresenterFactory::create(PresenterType::File(destination.clone()))
                .present(&export.content)?;
            ctx.progress()
                .report_completion(&format!("✅ Exported to {}", destination.display()));
        }
        Command::ExtractCves { path } => {
            let source = path.clone().map_or(ResultSource::Latest, ResultSource::Backend);
            let cves = view_use_case(&ctx)?.extract_cves_remotely(&source).await?;
            ctx.present(&ctx.listing().raw(&cves)?)?;
        }
        Command::Alerts { action } => {
            let session = ctx.session(&args)?;
            let use_case = ManageAlertsUseCase::new(ctx.backend()?, ctx.progress());
            match action {
                AlertsCommand::List => {
                    let alerts = use_case.list(&session).await?;
                    ctx.present(&ctx.listing().alerts(&alerts)?)?;
                }
                AlertsCommand::Delete { id } => {
                    let response = use_case.delete(&session, id).await?;
                    ctx.present(&ctx.listing().raw(&response)?)?;
                }
            }
        }
        Command::Ip => {
            let use_case = InspectAccountUseCase::new(PublicServicesClient::new()?, ctx.progress());
            let ip = use_case.public_ip().await?;
            ctx.present(&ctx.listing().public_ip(&ip)?)?;
        }
        Command::Credits => {
            let session = ctx.session(&args)?;
            let use_case = InspectAccountUseCase::new(PublicServicesClient::new()?, ctx.progress());
            let report = use_case.credits(&session).await?;
            ctx.present(&ctx.listing().credits(&report)?)?;
        }
        Command::Key { action } => manage_key(&ctx, action)?,
    }

    Ok(ExitCode::Success)
}

fn view_use_case(
    ctx: &Context,
) -> Result<ViewResultUseCase<HttpBackendClient, FileSystemReader, StderrProgressReporter>> {
    Ok(ViewResultUseCase::new(
        ctx.backend()?,
        FileSystemReader::new(),
        ctx.progress(),
        ctx.analyzer(),
    ))
}

async fn show_result(ctx: &Context, source: &ResultSource, view: ReportView) -> Result<()> {
    let model = view_use_case(ctx)?.execute(source, view).await?;
    ctx.present_model(&model)
}

async fn run_script(ctx: &Context, session: &Session, request: RunRequest) -> Result<ExitCode> {
    let progress = ctx.progress();
    let use_case = RunScriptUseCase::new(ctx.backend()?, ctx.progress(), ctx.analyzer());
    let report = use_case.execute(&request, session).await?;

    match &report.status {
        RunStatus::Error(_) => {
            progress.report_error(&format!("❌ {}: {}", report.script, report.status));
            return Ok(ExitCode::ScriptFailed);
        }
        RunStatus::Warning(_) => progress.report_error(&format!("⚠️  {}", report.status)),
        RunStatus::Pending(_) => progress.report(&format!("⏳ {}", report.status)),
        RunStatus::Finished => {
            progress.report_completion(&format!("✅ {}: {}", report.script, report.status))
        }
    }

    match &report.model {
        Some(model) => ctx.present_model(model)?,
        None if ctx.format == OutputFormat::Json => {
            ctx.present(&ctx.listing().raw(&serde_json::to_value(&report.response)?)?)?
        }
        None => {}
    }

    Ok(ExitCode::Success)
}

fn manage_key(ctx: &Context, action: &KeyCommand) -> Result<()> {
    let store = ctx.key_store()?;
    let progress = ctx.progress();
    match action {
        KeyCommand::Set { key } => {
            if key.trim().is_empty() {
                return Err(DashboardError::Validation {
                    message: "API key must not be empty; use `key clear` to remove it".to_string(),
                }
                .into());
            }
            store.save_key(key)?;
            progress.report_completion(&format!("✅ API key saved to {}", store.path().display()));
        }
        KeyCommand::Clear => {
            store.save_key("")?;
            progress.report_completion("✅ API key cleared");
        }
        KeyCommand::Show => {
            let line = match store.load_key()? {
                Some(key) => format!("{} ({})", mask_key(&key), store.path().display()),
                None => format!("No API key stored ({})", store.path().display()),
            };
            ctx.present(&line)?;
        }
    }
    Ok(())
}

fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    if key.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
