use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use shared_models::auth::Role;

#[derive(Parser)]
#[command(name = "hospital-portal")]
#[command(about = "Hospital CMS portal: doctor directory, appointments and patient accounts")]
pub struct Cli {
    /// Answer yes to every confirmation prompt.
    #[arg(long, global = true)]
    pub yes: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and open the matching dashboard.
    Login {
        #[command(subcommand)]
        account: LoginAccount,
    },
    /// Pick a role from the landing page without logging in.
    Role {
        #[arg(value_parser = parse_role)]
        role: Role,
    },
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
    },
    Logout,
    /// Render the header for a page path.
    Header {
        path: String,
    },
    /// Doctor directory, optionally filtered.
    Doctors {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        time: String,
        #[arg(long, default_value = "")]
        specialty: String,
    },
    DeleteDoctor {
        id: i64,
    },
    AddDoctor {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        specialty: String,
        /// Repeat for each slot, e.g. `--time 09:00-10:00`.
        #[arg(long = "time")]
        times: Vec<String>,
    },
    Book {
        doctor_id: i64,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        slot: String,
    },
    /// Doctor dashboard: the day's patients.
    Appointments {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        patient: Option<String>,
    },
    /// Appointments of the logged-in patient.
    MyAppointments {
        #[arg(long)]
        condition: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum LoginAccount {
    Admin {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    Doctor {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Patient {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

fn parse_role(raw: &str) -> Result<Role, String> {
    raw.parse::<Role>().map_err(|e| e.to_string())
}
