use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "eventdesk")]
#[command(version)]
#[command(about = "Campus event management client")]
pub struct Cli {
    /// Settings file to read instead of ./eventdesk.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and save the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create a student account
    Register(StudentProfileArgs),
    /// Sign out and remove the saved session
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Show the navigation menu of the signed-in role
    Nav,
    /// Resolve a page path through the role guard
    Open {
        #[arg(value_name = "PATH")]
        path: String,
    },
    /// Admin dashboard
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
    /// Faculty dashboard
    Faculty {
        #[command(subcommand)]
        command: FacultyCommands,
    },
    /// Coordinator dashboard
    Coordinator {
        #[command(subcommand)]
        command: CoordinatorCommands,
    },
    /// Student dashboard
    Student {
        #[command(subcommand)]
        command: StudentCommands,
    },
}

#[derive(Args)]
pub struct StudentProfileArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub department: String,
    /// Profile image URL
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Create a faculty account
    RegisterFaculty {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        contact_no: String,
        #[arg(long)]
        password: String,
        /// Photo URL
        #[arg(long)]
        photo: Option<String>,
    },
    /// List faculty accounts
    Faculties,
    /// Delete a faculty account
    DeleteFaculty {
        #[arg(value_name = "FACULTY_ID")]
        id: String,
    },
}

#[derive(Subcommand)]
pub enum FacultyCommands {
    /// List events waiting for approval
    Events,
    /// Approve an event
    Approve {
        #[arg(value_name = "EVENT_ID")]
        id: String,
    },
    /// Reject an event
    Reject {
        #[arg(value_name = "EVENT_ID")]
        id: String,
    },
}

#[derive(Subcommand)]
pub enum CoordinatorCommands {
    /// Submit a new event for approval
    CreateEvent(CreateEventArgs),
    /// List the events you created
    Events,
    /// Show the participants of an approved event
    Participants {
        #[arg(value_name = "EVENT_ID")]
        event_id: String,
        /// Also write them to an .xlsx file
        #[arg(long)]
        export: bool,
    },
}

#[derive(Args)]
pub struct CreateEventArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    /// Event date, YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    #[arg(long)]
    pub time: String,
    #[arg(long)]
    pub venue: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long, default_value = "")]
    pub contact_email: String,
    /// Banner image URL
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Subcommand)]
pub enum StudentCommands {
    /// List available events
    Events,
    /// List the events you registered for
    MyEvents,
    /// Register for an event
    Register {
        #[arg(value_name = "EVENT_ID")]
        event_id: String,
    },
    /// List clubs
    Clubs,
}
