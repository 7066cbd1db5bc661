//! Command-line interface
//!
//! One subcommand per dashboard action. `shell` keeps a single mock alive
//! across many commands, so mutations stay visible until it exits.

use std::path::PathBuf;

use anyhow::{bail, Result};
use bookfair_core::{
    BusinessDraft, ProfileUpdate, ReservationStatus, StallList, VendorDraft,
};
use bookfair_net::{Server, Transport};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::render;
use crate::state::AppState;
use crate::viewmodel::{
    auth, BusinessesPage, DashboardPage, Notice, ProfilePage, ReservationsPage, StallMapPage,
    VendorsPage,
};

#[derive(Debug, Parser)]
#[command(name = "bookfair-admin", version, about = "Book fair stall reservation admin")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// A single line entered at the shell prompt
#[derive(Debug, Parser)]
#[command(name = "bookfair", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the mock API over HTTP, forwarding other paths to the origin
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Sign in as an administrator
    Login { email: String, password: String },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show dashboard statistics and recent activity
    Dashboard,
    /// Show the stall map
    Stalls,
    /// Assign a stall to a vendor
    Assign { stall_id: String, vendor_id: String },
    /// List reservations
    Reservations {
        #[arg(long, value_enum)]
        status: Option<StatusFilter>,
        /// Case-insensitive match on publisher, email or stall id
        #[arg(long)]
        search: Option<String>,
    },
    /// Approve a reservation
    Approve { reservation_id: String },
    /// Decline a reservation
    Decline { reservation_id: String },
    /// List vendors
    Vendors {
        /// Case-insensitive match on name, email or stall id
        #[arg(long)]
        search: Option<String>,
    },
    /// Register a vendor
    AddVendor(VendorArgs),
    /// List registered businesses
    Businesses,
    /// Register a business
    AddBusiness(BusinessArgs),
    /// Show the admin profile
    Profile,
    /// Update profile fields
    UpdateProfile(ProfileArgs),
    /// Interactive prompt sharing one mock across commands
    Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusFilter {
    Pending,
    Confirmed,
    Declined,
}

impl From<StatusFilter> for ReservationStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Pending => ReservationStatus::Pending,
            StatusFilter::Confirmed => ReservationStatus::Confirmed,
            StatusFilter::Declined => ReservationStatus::Declined,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct VendorArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub contact: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Comma-separated stall ids
    #[arg(long)]
    pub stalls: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
}

impl From<VendorArgs> for VendorDraft {
    fn from(args: VendorArgs) -> Self {
        VendorDraft {
            name: args.name,
            contact: args.contact,
            email: args.email,
            stalls: args.stalls.map(StallList::Csv),
            category: args.category,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct BusinessArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub registration_number: Option<String>,
    #[arg(long)]
    pub contact_number: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

impl From<BusinessArgs> for BusinessDraft {
    fn from(args: BusinessArgs) -> Self {
        BusinessDraft {
            name: args.name,
            registration_number: args.registration_number,
            contact_number: args.contact_number,
            address: args.address,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub dob: Option<String>,
    #[arg(long)]
    pub nic: Option<String>,
}

impl From<ProfileArgs> for ProfileUpdate {
    fn from(args: ProfileArgs) -> Self {
        ProfileUpdate {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            address: args.address,
            dob: args.dob,
            nic: args.nic,
            ..Default::default()
        }
    }
}

/// Run one command against the application state
pub async fn run<I: Transport + 'static>(state: &mut AppState<I>, command: Command) -> Result<()> {
    match command {
        Command::Shell => shell(state).await,
        command => execute(state, command).await,
    }
}

async fn execute<I: Transport + 'static>(state: &mut AppState<I>, command: Command) -> Result<()> {
    match command {
        Command::Serve { port } => serve(state, port).await,
        Command::Login { email, password } => {
            let user = auth::login(state, &email, &password).await?;
            println!("Signed in as {} <{}>", user.name, user.email);
            Ok(())
        }
        Command::Logout => {
            auth::logout(state).await?;
            println!("Signed out");
            Ok(())
        }
        Command::Whoami => {
            match &state.current_user {
                Some(user) if state.is_authenticated() => println!("{}", render::user(user)),
                _ => println!("Not signed in"),
            }
            Ok(())
        }
        Command::Dashboard => {
            let mut page = DashboardPage::default();
            page.load(&state.client).await?;
            if let Some(dashboard) = page.dashboard() {
                print!("{}", render::dashboard(dashboard));
            }
            Ok(())
        }
        Command::Stalls => {
            let mut page = StallMapPage::default();
            page.load(&state.client).await?;
            print!("{}", render::stall_map(&page));
            Ok(())
        }
        Command::Assign {
            stall_id,
            vendor_id,
        } => {
            let mut page = StallMapPage::default();
            page.load(&state.client).await?;
            let result = page.assign(&state.client, &stall_id, &vendor_id).await;
            notify(Notice::from_result(&result, |stall| {
                format!(
                    "Stall {} assigned to {}",
                    stall.id,
                    stall.publisher.as_deref().unwrap_or("-")
                )
            }))
        }
        Command::Reservations { status, search } => {
            let mut page = ReservationsPage::default();
            page.load(&state.client).await?;
            print!(
                "{}",
                render::reservations(
                    &page,
                    search.as_deref().unwrap_or_default(),
                    status.map(Into::into)
                )
            );
            Ok(())
        }
        Command::Approve { reservation_id } => {
            let mut page = ReservationsPage::default();
            page.load(&state.client).await?;
            let result = page.approve(&state.client, &reservation_id).await;
            notify(Notice::from_result(&result, |r| {
                format!("Reservation {} approved", r.id)
            }))
        }
        Command::Decline { reservation_id } => {
            let mut page = ReservationsPage::default();
            page.load(&state.client).await?;
            let result = page.decline(&state.client, &reservation_id).await;
            notify(Notice::from_result(&result, |r| {
                format!("Reservation {} declined", r.id)
            }))
        }
        Command::Vendors { search } => {
            let mut page = VendorsPage::default();
            page.load(&state.client).await?;
            let vendors: Vec<_> = match search {
                Some(term) => page.search(&term),
                None => page.vendors().iter().collect(),
            };
            print!("{}", render::vendors(&vendors));
            Ok(())
        }
        Command::AddVendor(args) => {
            let mut page = VendorsPage::default();
            let result = page.create(&state.client, &args.into()).await;
            notify(Notice::from_result(&result, |v| {
                format!("Vendor {} added as {}", v.name, v.id)
            }))
        }
        Command::Businesses => {
            let mut page = BusinessesPage::default();
            page.load(&state.client).await?;
            print!("{}", render::businesses(&page));
            Ok(())
        }
        Command::AddBusiness(args) => {
            let mut page = BusinessesPage::default();
            let result = page.create(&state.client, &args.into()).await;
            notify(Notice::from_result(&result, |b| {
                format!("Business {} registered as #{}", b.name, b.business_id)
            }))
        }
        Command::Profile => {
            let mut page = ProfilePage::default();
            page.load(&state.client).await?;
            if let (Some(name), Some(profile)) = (page.full_name(), page.profile()) {
                println!("{}\n", name);
                print!("{}", render::profile(profile));
            }
            Ok(())
        }
        Command::UpdateProfile(args) => {
            let update: ProfileUpdate = args.into();
            if update.is_empty() {
                bail!("Nothing to update");
            }
            let mut page = ProfilePage::default();
            let result = page.save(&state.client, &update).await;
            notify(Notice::from_result(&result, |_| "Profile saved".to_string()))
        }
        Command::Shell => bail!("Already in a shell"),
    }
}

fn notify(notice: Notice) -> Result<()> {
    if notice.is_error() {
        eprintln!("{}", notice);
        bail!("Action failed");
    }
    println!("{}", notice);
    Ok(())
}

async fn serve<I: Transport + 'static>(state: &AppState<I>, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(state.config.server.port);
    let server = Server::start(port, state.fetch().clone()).await?;
    println!(
        "Mock API on http://{}{} (other paths go to {})",
        server.addr(),
        state.fetch().prefix(),
        state.config.origin
    );

    tokio::signal::ctrl_c().await?;
    server.shutdown();
    Ok(())
}

/// Parse one shell line into a command
fn parse_line(line: &str) -> std::result::Result<Command, clap::Error> {
    ShellLine::try_parse_from(line.split_whitespace()).map(|parsed| parsed.command)
}

async fn shell<I: Transport + 'static>(state: &mut AppState<I>) -> Result<()> {
    info!("Shell started");
    println!("bookfair-admin shell. Type `help` for commands, `exit` to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "exit" | "quit" => break,
            _ => {}
        }

        match parse_line(line) {
            Ok(Command::Shell) => eprintln!("Already in a shell"),
            Ok(command) => {
                if let Err(e) = execute(state, command).await {
                    eprintln!("error: {:#}", e);
                }
            }
            Err(e) => {
                let _ = e.print();
            }
        }
    }

    info!("Shell exited");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "bookfair-admin",
            "--config",
            "/tmp/bookfair.toml",
            "assign",
            "A02",
            "V001",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/bookfair.toml")));
        assert!(matches!(
            cli.command,
            Command::Assign { ref stall_id, ref vendor_id } if stall_id == "A02" && vendor_id == "V001"
        ));
    }

    #[test]
    fn test_shell_line_parsing() {
        assert!(matches!(
            parse_line("reservations --status pending").unwrap(),
            Command::Reservations {
                status: Some(StatusFilter::Pending),
                search: None,
            }
        ));
        assert!(matches!(
            parse_line("reservations --search godage").unwrap(),
            Command::Reservations { status: None, search: Some(ref term) } if term == "godage"
        ));
        assert!(matches!(parse_line("logout").unwrap(), Command::Logout));
        assert!(parse_line("reservations --status archived").is_err());
        assert!(parse_line("teleport").is_err());
    }

    #[test]
    fn test_vendor_args_become_draft() {
        let cli = Cli::try_parse_from([
            "bookfair-admin",
            "add-vendor",
            "--name",
            "Godage",
            "--stalls",
            "C20, C21",
        ])
        .unwrap();
        let Command::AddVendor(args) = cli.command else {
            panic!("expected add-vendor");
        };
        let draft: VendorDraft = args.into();
        assert_eq!(draft.name.as_deref(), Some("Godage"));
        assert_eq!(
            draft.stalls.map(StallList::normalize),
            Some(vec!["C20".to_string(), "C21".to_string()])
        );
    }

    #[test]
    fn test_empty_profile_update() {
        let update: ProfileUpdate = ProfileArgs {
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
            address: None,
            dob: None,
            nic: None,
        }
        .into();
        assert!(update.is_empty());
    }
}
