//! vercel-deploy - Deploy to Vercel from CI
//!
//! ## Commands
//!
//! - `vercel-deploy deploy` - Deploy, assign aliases, publish step outputs
//! - `vercel-deploy completions` - Generate shell completions
//!
//! ## Quick Start
//!
//! ```bash
//! # Preview deployment of the current directory
//! VERCEL_TOKEN=... vercel-deploy deploy
//!
//! # Production deployment with an alias
//! vercel-deploy deploy --production --alias https://www.example.com
//!
//! # Generate shell completions
//! vercel-deploy completions bash > /etc/bash_completion.d/vercel-deploy
//! ```

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if std::env::var("VERCEL_DEPLOY_VERBOSE").is_ok() {
                eprintln!("{:?}", e);
            }
            ExitCode::FAILURE
        }
    }
}
