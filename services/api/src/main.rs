use talent_pipeline_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("talent pipeline error: {err}");
        std::process::exit(1);
    }
}
