use clap::Parser;
use quiz_forge::clients::azure::AzureOpenAIClient;
use quiz_forge::clients::flexible::{ClientType, FlexibleClient};
use quiz_forge::config::{AppConfig, KeyFromEnv};
use quiz_forge::models::{sample_history_cases, MathTestCase};
use quiz_forge::orchestrator::QuizService;
use quiz_forge::schema::Quiz;
use quiz_forge::telemetry::init_tracing;
use std::time::Instant;
use tracing::warn;

#[derive(Parser)]
#[command(author, version, about = "Run the sample quiz generations end to end", long_about = None)]
struct Args {
    /// Model backend [default: QUIZ_CLIENT or auto-detect]
    #[arg(short, long, value_enum)]
    client: Option<ClientType>,

    /// Also generate a combined history + math batch
    #[arg(long)]
    combined: bool,

    /// Questions per subject for the combined batch
    #[arg(short, long, default_value_t = 3)]
    num_quizzes: u32,

    /// Print every option with its reason
    #[arg(short, long)]
    verbose: bool,
}

fn print_quiz(label: &str, quiz: &Quiz, verbose: bool) {
    println!("{}: {}", label, quiz.question);
    if verbose {
        for option in &quiz.options {
            let correctness = if option.is_correct { "Correct" } else { "Incorrect" };
            println!("- {} ({}): {}", option.content, correctness, option.reason);
        }
    }
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("quiz_forge=warn");

    let args = Args::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(client) = args.client {
        config.client = client;
    }
    config.validate()?;
    if config.client == ClientType::Mock && AzureOpenAIClient::find_key().is_none() {
        warn!("{} not set; the mock backend answers every prompt with an empty object", AzureOpenAIClient::KEY_NAME);
    }

    let service = QuizService::new(FlexibleClient::new(config.client, config.azure.clone()));
    let start = Instant::now();

    // 1. History quizzes, one per sample case
    let history = service.history_questions(sample_history_cases()).await?;
    for (idx, quiz) in history.iter().enumerate() {
        print_quiz(&format!("History Quiz {}", idx + 1), quiz, args.verbose);
    }

    // 2. One math quiz
    let math = service.math_question(MathTestCase::default()).await?;
    print_quiz("Math Quiz", &math, args.verbose);

    // 3. Both subjects together
    if args.combined {
        let case = sample_history_cases().remove(0);
        let combined = service
            .generate_quizzes(case, MathTestCase::default(), args.num_quizzes)
            .await?;
        for (idx, quiz) in combined.history_quiz.quizzes.iter().enumerate() {
            print_quiz(&format!("Combined History Quiz {}", idx + 1), quiz, args.verbose);
        }
        for (idx, quiz) in combined.math_quiz.quizzes.iter().enumerate() {
            print_quiz(&format!("Combined Math Quiz {}", idx + 1), quiz, args.verbose);
        }
    }

    println!("Total execution time: {:.2} seconds", start.elapsed().as_secs_f64());
    Ok(())
}
