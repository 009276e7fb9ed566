mod display;
mod shell;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use desaparecidos_client::{DEFAULT_BASE_URL, PortalClient};
use desaparecidos_core::{FilterForm, InfoForm};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "desaparecidos",
    version,
    about = "Consulta e envio de informações sobre pessoas desaparecidas (PJC-MT)"
)]
struct Cli {
    /// Base URL of the case API.
    #[arg(long, env = "DESAPARECIDOS_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    api_url: String,

    /// Log verbosity on stderr (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filtered roster of open cases.
    List(ListArgs),
    /// Case detail and its information feed.
    Details { id: String },
    /// Submit new information about a person's latest occurrence.
    AddInfo(AddInfoArgs),
    /// Missing/found totals.
    Stats,
    /// Resolve a portal path (`/`, `/details/:id`).
    Open { path: String },
}

#[derive(Args)]
struct ListArgs {
    #[arg(long)]
    nome: Option<String>,
    /// Lower bound of the age range.
    #[arg(long)]
    idade_inicial: Option<String>,
    /// Upper bound of the age range.
    #[arg(long)]
    idade_final: Option<String>,
    /// MASCULINO or FEMININO.
    #[arg(long)]
    sexo: Option<String>,
    /// DESAPARECIDO or LOCALIZADO.
    #[arg(long)]
    status: Option<String>,
    /// Page number, starting at 1.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pagina: u32,
}

impl ListArgs {
    fn form(&self) -> FilterForm {
        FilterForm {
            name: self.nome.clone().unwrap_or_default(),
            age_from: self.idade_inicial.clone().unwrap_or_default(),
            age_to: self.idade_final.clone().unwrap_or_default(),
            sex: self.sexo.clone().unwrap_or_default(),
            status: self.status.clone().unwrap_or_default(),
        }
    }
}

#[derive(Args)]
struct AddInfoArgs {
    /// Person id.
    id: String,
    /// What was seen or learned (at least 5 characters).
    #[arg(long)]
    informacao: String,
    /// Date of the event, YYYY-MM-DD.
    #[arg(long)]
    data: Option<NaiveDate>,
    /// Attachment (image, PDF, DOC, DOCX). Up to 2.
    #[arg(long = "arquivo")]
    arquivos: Vec<PathBuf>,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::info!("desaparecidos v{}", env!("CARGO_PKG_VERSION"));

    let client = PortalClient::new(cli.api_url)?;
    tracing::debug!(base_url = client.base_url(), "client ready");

    let rendered = match cli.command {
        Command::List(args) => shell::list(&client, args.form(), args.pagina - 1).await,
        Command::Details { id } => shell::details(&client, &id).await,
        Command::AddInfo(args) => {
            let mut files = Vec::with_capacity(args.arquivos.len());
            for path in &args.arquivos {
                files.push(shell::load_attachment(path).await?);
            }
            let form = InfoForm {
                text: args.informacao,
                date: args.data,
                files,
            };
            let today = chrono::Local::now().date_naive();
            shell::add_info(&client, &args.id, form, today).await
        }
        Command::Stats => shell::statistics(&client).await,
        Command::Open { path } => shell::open(&client, &path).await,
    };

    print!("{}", rendered.text);
    Ok(if rendered.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
