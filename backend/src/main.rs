use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
  match livelink_lib::run().await {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("error: {err:#}");
      ExitCode::FAILURE
    }
  }
}
