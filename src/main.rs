//! EventDesk command line client
//!
//! Main application entry point

mod cli;

use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing::{debug, info};

use eventdesk::{
    config::Settings,
    handlers::{
        self, ClubsPage, CoordinatorEventsPage, CreateEventPage, EventApprovalsPage, FacultyListPage, LoginPage,
        RegisterFacultyPage, RegisterPage, StudentEventsPage, StudentMyEventsPage, ViewParticipantsPage,
    },
    middleware::{Page, RoleGuard, RouteDecision},
    models::{CreateEventRequest, Event, RegisterFacultyRequest, RegisterStudentRequest},
    services::{Notification, NotificationId, ServiceFactory},
    utils::{helpers::truncate_text, logging},
};

use cli::{AdminCommands, Cli, Commands, CoordinatorCommands, FacultyCommands, StudentCommands};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::load(cli.config.as_deref())?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;
    info!("Starting {}", eventdesk::info());

    let services = ServiceFactory::from_settings(settings)?;
    let printer = NotificationPrinter::start(&services);

    let state = services.session_store.restore().await;
    debug!(authenticated = state.is_authenticated(), "Session state after restore");

    let succeeded = run(&services, cli.command).await;
    printer.flush(&services.notifications.visible());

    Ok(if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Prints every notification once, including ones that expire mid-command
#[derive(Clone)]
struct NotificationPrinter {
    last: Arc<Mutex<Option<NotificationId>>>,
}

impl NotificationPrinter {
    fn start(services: &ServiceFactory) -> Self {
        let printer = Self { last: Arc::new(Mutex::new(None)) };
        let mut updates = services.notifications.subscribe();
        let background = printer.clone();
        tokio::spawn(async move {
            while updates.changed().await.is_ok() {
                let entries = updates.borrow_and_update().clone();
                background.flush(&entries);
            }
        });
        printer
    }

    fn flush(&self, entries: &[Notification]) {
        let mut last = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for entry in entries {
            if Some(entry.id) > *last {
                println!("[{}] {}", entry.kind, entry.message);
                *last = Some(entry.id);
            }
        }
    }
}

/// Resolve `page` for the current identity; prints the redirect when it is not renderable
fn enter(services: &ServiceFactory, page: Page) -> bool {
    let identity = services.session_store.identity();
    match services.guard.resolve(identity.as_ref(), page.path()) {
        RouteDecision::Render(rendered) if rendered == page => true,
        RouteDecision::Render(other) => {
            println!("Redirected to {}", other.path());
            false
        }
        RouteDecision::Redirect(to) => {
            println!("Redirected to {}", to);
            false
        }
    }
}

async fn run(services: &ServiceFactory, command: Commands) -> bool {
    match command {
        Commands::Login { email, password } => match LoginPage::new(services).submit(&email, &password).await {
            Ok(landing) => {
                println!("Redirected to {}", landing);
                true
            }
            Err(_) => false,
        },
        Commands::Register(profile) => {
            let request = RegisterStudentRequest {
                name: profile.name,
                email: profile.email,
                password: profile.password,
                department: profile.department,
                image: profile.image,
            };
            match RegisterPage::new(services).submit(&request).await {
                Ok(next) => {
                    println!("Redirected to {}", next);
                    true
                }
                Err(_) => false,
            }
        }
        Commands::Logout => {
            println!("Redirected to {}", handlers::logout(services).await);
            true
        }
        Commands::Whoami => {
            match services.session_store.identity() {
                Some(identity) => println!("{} <{}> ({})", identity.name, identity.email, identity.role),
                None => println!("Not signed in"),
            }
            true
        }
        Commands::Nav => match services.session_store.identity() {
            Some(identity) => {
                let navbar = RoleGuard::navbar(&identity);
                println!("{} [{}]", navbar.display_name.unwrap_or_default(), navbar.brand_path);
                for item in navbar.items {
                    println!("  {:<20} {}", item.label, item.path);
                }
                println!("  {:<20} {}", "Logout", RoleGuard::logout_path());
                true
            }
            None => {
                println!("Redirected to {}", RoleGuard::logout_path());
                false
            }
        },
        Commands::Open { path } => {
            let identity = services.session_store.identity();
            match services.guard.resolve(identity.as_ref(), &path) {
                RouteDecision::Render(page) => println!("Render {:?} ({})", page, page.path()),
                RouteDecision::Redirect(to) => println!("Redirected to {}", to),
            }
            true
        }
        Commands::Admin { command } => run_admin(services, command).await,
        Commands::Faculty { command } => run_faculty(services, command).await,
        Commands::Coordinator { command } => run_coordinator(services, command).await,
        Commands::Student { command } => run_student(services, command).await,
    }
}

async fn run_admin(services: &ServiceFactory, command: AdminCommands) -> bool {
    match command {
        AdminCommands::RegisterFaculty { name, email, contact_no, password, photo } => {
            if !enter(services, Page::RegisterFaculty) {
                return false;
            }
            let mut page = RegisterFacultyPage::new(services);
            page.form = RegisterFacultyRequest { name, email, contact_no, password, photo };
            page.submit().await.is_ok()
        }
        AdminCommands::Faculties => {
            if !enter(services, Page::FacultyList) {
                return false;
            }
            let mut page = FacultyListPage::new(services);
            let loaded = page.load().await.is_ok();
            for faculty in &page.faculties {
                println!(
                    "{}  {:<25} {:<30} {}",
                    faculty.id,
                    faculty.name,
                    faculty.email,
                    faculty.contact_no.as_deref().unwrap_or("N/A")
                );
            }
            loaded
        }
        AdminCommands::DeleteFaculty { id } => {
            if !enter(services, Page::FacultyList) {
                return false;
            }
            FacultyListPage::new(services).delete(&id).await.is_ok()
        }
    }
}

async fn run_faculty(services: &ServiceFactory, command: FacultyCommands) -> bool {
    if !enter(services, Page::EventApprovals) {
        return false;
    }
    let mut page = EventApprovalsPage::new(services);
    match command {
        FacultyCommands::Events => {
            let loaded = page.load().await.is_ok();
            print_events(&page.events);
            loaded
        }
        FacultyCommands::Approve { id } => page.approve(&id).await.is_ok(),
        FacultyCommands::Reject { id } => page.reject(&id).await.is_ok(),
    }
}

async fn run_coordinator(services: &ServiceFactory, command: CoordinatorCommands) -> bool {
    match command {
        CoordinatorCommands::CreateEvent(args) => {
            if !enter(services, Page::CreateEvent) {
                return false;
            }
            let mut page = CreateEventPage::new(services);
            page.form = CreateEventRequest {
                name: args.name,
                description: args.description,
                date: args.date,
                time: args.time,
                venue: args.venue,
                address: args.address,
                contact_email: args.contact_email,
                image: args.image,
            };
            page.submit().await.is_ok()
        }
        CoordinatorCommands::Events => {
            if !enter(services, Page::CoordinatorEvents) {
                return false;
            }
            let mut page = CoordinatorEventsPage::new(services);
            let loaded = page.load().await.is_ok();
            print_events(&page.events);
            loaded
        }
        CoordinatorCommands::Participants { event_id, export } => {
            if !enter(services, Page::ViewParticipants) {
                return false;
            }
            let mut page = ViewParticipantsPage::new(services);
            if page.fetch_participants(&event_id).await.is_err() {
                return false;
            }
            for (index, participant) in page.participants.iter().enumerate() {
                println!(
                    "{:>4}  {:<15} {:<25} {:<30} {}",
                    index + 1,
                    participant.student_id.as_deref().unwrap_or("N/A"),
                    participant.name,
                    participant.email,
                    participant.department.as_deref().unwrap_or("N/A")
                );
            }
            if !export {
                return true;
            }
            match page.export_to_excel().await {
                Ok(path) => {
                    println!("Wrote {}", path.display());
                    true
                }
                Err(_) => false,
            }
        }
    }
}

async fn run_student(services: &ServiceFactory, command: StudentCommands) -> bool {
    match command {
        StudentCommands::Events => {
            if !enter(services, Page::StudentEvents) {
                return false;
            }
            let mut page = StudentEventsPage::new(services);
            let loaded = page.load().await.is_ok();
            for event in &page.events {
                let marker = if page.is_registered(&event.id) { "registered" } else { "" };
                println!("{}  {:<30} {:<12} {}", event.id, truncate_text(&event.name, 30), event.date, marker);
            }
            loaded
        }
        StudentCommands::MyEvents => {
            if !enter(services, Page::StudentMyEvents) {
                return false;
            }
            let mut page = StudentMyEventsPage::new(services);
            let loaded = page.load().await.is_ok();
            print_events(&page.events);
            loaded
        }
        StudentCommands::Register { event_id } => {
            if !enter(services, Page::StudentEvents) {
                return false;
            }
            StudentEventsPage::new(services).register(&event_id).await.is_ok()
        }
        StudentCommands::Clubs => {
            if !enter(services, Page::Clubs) {
                return false;
            }
            let mut page = ClubsPage::new(services);
            let loaded = page.load().await.is_ok();
            for club in &page.clubs {
                let description = club.description.as_deref().unwrap_or_default();
                println!("{:<25} {}", club.name, truncate_text(description, 60));
            }
            loaded
        }
    }
}

fn print_events(events: &[Event]) {
    if events.is_empty() {
        println!("No events");
    }
    for event in events {
        println!(
            "{}  {:<30} {:<12} {:<10} {:>3} registered",
            event.id,
            truncate_text(&event.name, 30),
            event.date,
            event.status.to_string(),
            event.participant_count()
        );
    }
}
