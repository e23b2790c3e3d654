use optima_underwriter_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("optima-underwriter-api failed: {err}");
        std::process::exit(1);
    }
}
