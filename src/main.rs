use histsim::error::AppResult;

fn main() -> AppResult<()> {
    histsim::entry::run()
}
