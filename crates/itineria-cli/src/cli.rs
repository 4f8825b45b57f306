//! Command definitions and their handlers.
//!
//! The clap argument structs here stay separate from the core parameter
//! types; each converts into its core counterpart with `From`, so the core
//! crate never sees clap attributes:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → TripPlanner / clients
//! ```
//!
//! [`Cli`] owns the loaded configuration and the renderer and dispatches each
//! subcommand. The database is opened only by commands that need it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Subcommand};
use itineria_core::{
    ChatClient, ChatSession, Config, CreateResult, DeleteResult, ItineraryError, JsonFileBackend,
    NearbyPlaces, OperationStatus, PhotoOwner, PhotoOwnerKind, Places, PlacesClient, ProfileStore,
    TripPlanner, TripPlannerBuilder, UpdateResult,
    config::{CHAT_API_KEY_ENV, PLACES_API_KEY_ENV},
    params::*,
    profile::{derive_initials, validate_email},
};
use jiff::civil::Date;
use log::{debug, info};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Trip commands
// ============================================================================

/// Create a new itinerary
///
/// Without dates the trip starts today. A missing end date becomes the later
/// of the start date and today.
#[derive(Args)]
pub struct CreateTripArgs {
    /// Name of the trip
    pub name: String,
    /// What the trip is about
    pub description: String,
    #[arg(short, long, help = "First day of the trip (YYYY-MM-DD)")]
    pub start: Option<Date>,
    #[arg(short, long, help = "Last day of the trip (YYYY-MM-DD)")]
    pub end: Option<Date>,
}

impl From<CreateTripArgs> for CreateItinerary {
    fn from(val: CreateTripArgs) -> Self {
        CreateItinerary {
            name: val.name,
            description: val.description,
            start_date: val.start,
            end_date: val.end,
        }
    }
}

/// List itineraries, newest first
#[derive(Args)]
pub struct ListTripsArgs {
    #[arg(short, long, help = "Only trips whose name contains this text")]
    pub name: Option<String>,
    #[arg(long, help = "Hide trips that have already ended")]
    pub upcoming: bool,
}

impl From<ListTripsArgs> for ListItineraries {
    fn from(val: ListTripsArgs) -> Self {
        ListItineraries {
            name_contains: val.name,
            upcoming_from: val.upcoming.then(|| jiff::Zoned::now().date()),
        }
    }
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(help = "Unique identifier of the record to show")]
    pub id: u64,
}

impl From<ShowArgs> for Id {
    fn from(val: ShowArgs) -> Self {
        Id { id: val.id }
    }
}

/// Change an itinerary's name, description or dates
#[derive(Args)]
pub struct UpdateTripArgs {
    #[arg(help = "Unique identifier of the itinerary to update")]
    pub id: u64,
    #[arg(short, long, help = "New name")]
    pub name: Option<String>,
    #[arg(short, long, help = "New description")]
    pub description: Option<String>,
    #[arg(short, long, help = "New first day (YYYY-MM-DD)")]
    pub start: Option<Date>,
    #[arg(short, long, help = "New last day (YYYY-MM-DD)")]
    pub end: Option<Date>,
}

impl From<UpdateTripArgs> for UpdateItinerary {
    fn from(val: UpdateTripArgs) -> Self {
        UpdateItinerary {
            id: val.id,
            name: val.name,
            description: val.description,
            start_date: val.start,
            end_date: val.end,
        }
    }
}

/// Delete an itinerary together with all of its planner items
#[derive(Args)]
pub struct DeleteTripArgs {
    #[arg(help = "Unique identifier of the itinerary to delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteTripArgs> for DeleteItinerary {
    fn from(val: DeleteTripArgs) -> Self {
        DeleteItinerary {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Exactly one photo action per invocation.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct PhotoAction {
    #[arg(long, help = "Store the image in this file as the photo")]
    pub file: Option<PathBuf>,
    #[arg(long, help = "Download a places photo by reference and store it")]
    pub reference: Option<String>,
    #[arg(long, help = "Write the stored photo to this file")]
    pub output: Option<PathBuf>,
    #[arg(long, help = "Remove the stored photo")]
    pub clear: bool,
}

#[derive(Args)]
pub struct PhotoArgs {
    #[arg(help = "Unique identifier of the photo's owner")]
    pub id: u64,
    #[command(flatten)]
    pub action: PhotoAction,
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// Create a new itinerary
    #[command(alias = "c")]
    Create(CreateTripArgs),
    /// List itineraries
    #[command(aliases = ["l", "ls"])]
    List(ListTripsArgs),
    /// Show an itinerary with its planner items
    #[command(alias = "s")]
    Show(ShowArgs),
    /// Update an itinerary
    #[command(alias = "u")]
    Update(UpdateTripArgs),
    /// Delete an itinerary and its planner items
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteTripArgs),
    /// Store, export or remove the itinerary's cover photo
    Photo(PhotoArgs),
}

// ============================================================================
// Item commands
// ============================================================================

/// Add a destination to an itinerary
///
/// Items are appended after the existing ones. Dates are optional; when both
/// are given the end may not come before the start.
#[derive(Args)]
pub struct AddItemArgs {
    #[arg(help = "Unique identifier of the itinerary to add this item to")]
    pub itinerary_id: u64,
    /// Where you are going
    pub destination: String,
    #[arg(short, long, help = "Arrival day (YYYY-MM-DD)")]
    pub start: Option<Date>,
    #[arg(short, long, help = "Departure day (YYYY-MM-DD)")]
    pub end: Option<Date>,
    #[arg(short, long, default_value = "", help = "Free-form notes")]
    pub notes: String,
}

impl From<AddItemArgs> for AddPlannerItem {
    fn from(val: AddItemArgs) -> Self {
        AddPlannerItem {
            itinerary_id: val.itinerary_id,
            destination: val.destination,
            start_date: val.start,
            end_date: val.end,
            notes: val.notes,
        }
    }
}

#[derive(Args)]
pub struct UpdateItemArgs {
    #[arg(help = "Unique identifier of the planner item to update")]
    pub id: u64,
    #[arg(short, long, help = "New destination")]
    pub destination: Option<String>,
    #[arg(short, long, help = "New notes")]
    pub notes: Option<String>,
    #[arg(short, long, help = "New arrival day (YYYY-MM-DD)")]
    pub start: Option<Date>,
    #[arg(short, long, help = "New departure day (YYYY-MM-DD)")]
    pub end: Option<Date>,
}

impl From<UpdateItemArgs> for UpdatePlannerItem {
    fn from(val: UpdateItemArgs) -> Self {
        UpdatePlannerItem {
            id: val.id,
            destination: val.destination,
            notes: val.notes,
            start_date: val.start,
            end_date: val.end,
        }
    }
}

#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add a planner item to an itinerary
    #[command(alias = "a")]
    Add(AddItemArgs),
    /// Show a single planner item
    #[command(alias = "s")]
    Show(ShowArgs),
    /// Update a planner item
    #[command(alias = "u")]
    Update(UpdateItemArgs),
    /// Delete a planner item
    #[command(aliases = ["d", "rm"])]
    Delete(ShowArgs),
    /// Store, export or remove the planner item's photo
    Photo(PhotoArgs),
}

// ============================================================================
// Places commands
// ============================================================================

#[derive(Args)]
pub struct CoordinateArgs {
    #[arg(long, allow_negative_numbers = true, help = "Latitude in degrees")]
    pub lat: f64,
    #[arg(long, allow_negative_numbers = true, help = "Longitude in degrees")]
    pub lng: f64,
}

#[derive(Subcommand)]
pub enum PlacesCommands {
    /// Search places matching a query near a location
    #[command(alias = "s")]
    Search {
        /// What to look for, e.g. "ramen"
        query: String,
        #[command(flatten)]
        at: CoordinateArgs,
    },
    /// List places within 100 metres of a location
    #[command(alias = "n")]
    Nearby {
        #[command(flatten)]
        at: CoordinateArgs,
    },
    /// Download a place photo by its reference
    Photo {
        /// Photo reference from a nearby search
        reference: String,
        #[arg(short, long, help = "File to write the image to")]
        output: PathBuf,
    },
}

// ============================================================================
// Profile commands
// ============================================================================

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the stored profile
    Show,
    /// Save name, email and username; initials are derived from the name
    Save {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
    },
    /// Check whether an email address is accepted
    CheckEmail { email: String },
    /// Print the initials derived from a full name
    Initials { name: String },
}

// ============================================================================
// Handlers
// ============================================================================

/// Dispatches parsed commands against the core library.
pub struct Cli {
    config: Config,
    database_file: Option<PathBuf>,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(config: Config, database_file: Option<PathBuf>, renderer: TerminalRenderer) -> Self {
        Self {
            config,
            database_file,
            renderer,
        }
    }

    async fn planner(&self) -> Result<TripPlanner> {
        let path = match &self.database_file {
            Some(path) => path.clone(),
            None => self.config.database_path()?,
        };

        TripPlannerBuilder::new()
            .with_database_path(Some(path))
            .build()
            .await
            .context("Failed to initialize planner")
    }

    fn places_client(&self) -> Result<PlacesClient> {
        if self.config.places.api_key.is_empty() {
            bail!(
                "No places API key configured; set {PLACES_API_KEY_ENV} or places.api_key in the config file"
            );
        }
        PlacesClient::from_config(&self.config.places, self.config.timeout())
            .context("Failed to create places client")
    }

    fn chat_client(&self, model: Option<String>) -> Result<ChatClient> {
        if self.config.chat.api_key.is_empty() {
            bail!(
                "No chat API key configured; set {CHAT_API_KEY_ENV} or chat.api_key in the config file"
            );
        }
        let client = ChatClient::from_config(&self.config.chat, self.config.timeout())
            .context("Failed to create chat client")?;
        Ok(match model {
            Some(model) => client.with_model(model),
            None => client,
        })
    }

    fn profile_store(&self) -> Result<ProfileStore<JsonFileBackend>> {
        let path = self.config.profile_path()?;
        let backend = JsonFileBackend::open(&path)
            .with_context(|| format!("Failed to open profile at {}", path.display()))?;
        Ok(ProfileStore::new(backend))
    }

    fn render(&self, output: impl ToString) -> Result<()> {
        self.renderer.render(&output.to_string())
    }

    pub async fn list_trips(&self, params: &ListItineraries) -> Result<()> {
        let summaries = self
            .planner()
            .await?
            .list_itinerary_summaries(params)
            .await
            .context("Failed to list itineraries")?;
        self.render(summaries)
    }

    pub async fn handle_trip_command(&self, command: TripCommands) -> Result<()> {
        let planner = self.planner().await?;

        match command {
            TripCommands::Create(args) => {
                let itinerary = planner
                    .create_itinerary(&args.into())
                    .await
                    .context("Failed to create itinerary")?;
                self.render(CreateResult::new(itinerary))
            }
            TripCommands::List(args) => {
                let summaries = planner
                    .list_itinerary_summaries(&args.into())
                    .await
                    .context("Failed to list itineraries")?;
                self.render(summaries)
            }
            TripCommands::Show(args) => {
                let id = args.id;
                let itinerary = planner
                    .get_itinerary(&args.into())
                    .await?
                    .ok_or(ItineraryError::ItineraryNotFound { id })?;
                self.render(itinerary)
            }
            TripCommands::Update(args) => {
                let changes = trip_changes(&args);
                let itinerary = planner
                    .update_itinerary(&args.into())
                    .await
                    .context("Failed to update itinerary")?;
                self.render(UpdateResult::with_changes(itinerary, changes))
            }
            TripCommands::Delete(args) => {
                if !args.confirm {
                    bail!(
                        "Deleting itinerary {} also deletes all of its planner items. Re-run with --confirm to proceed.",
                        args.id
                    );
                }
                let id = args.id;
                let deleted = planner
                    .delete_itinerary(&args.into())
                    .await
                    .context("Failed to delete itinerary")?
                    .ok_or(ItineraryError::ItineraryNotFound { id })?;
                self.render(DeleteResult::new(deleted))
            }
            TripCommands::Photo(args) => {
                self.handle_photo(&planner, PhotoOwner::itinerary(args.id), args.action)
                    .await
            }
        }
    }

    pub async fn handle_item_command(&self, command: ItemCommands) -> Result<()> {
        let planner = self.planner().await?;

        match command {
            ItemCommands::Add(args) => {
                let item = planner
                    .add_item(&args.into())
                    .await
                    .context("Failed to add planner item")?;
                self.render(CreateResult::new(item))
            }
            ItemCommands::Show(args) => {
                let id = args.id;
                let item = planner
                    .get_item(&args.into())
                    .await?
                    .ok_or(ItineraryError::PlannerItemNotFound { id })?;
                self.render(item)
            }
            ItemCommands::Update(args) => {
                let changes = item_changes(&args);
                let item = planner
                    .update_item(&args.into())
                    .await
                    .context("Failed to update planner item")?;
                self.render(UpdateResult::with_changes(item, changes))
            }
            ItemCommands::Delete(args) => {
                let id = args.id;
                let deleted = planner
                    .delete_item(&args.into())
                    .await
                    .context("Failed to delete planner item")?
                    .ok_or(ItineraryError::PlannerItemNotFound { id })?;
                self.render(DeleteResult::new(deleted))
            }
            ItemCommands::Photo(args) => {
                self.handle_photo(&planner, PhotoOwner::planner_item(args.id), args.action)
                    .await
            }
        }
    }

    async fn handle_photo(
        &self,
        planner: &TripPlanner,
        owner: PhotoOwner,
        action: PhotoAction,
    ) -> Result<()> {
        let label = owner_label(owner);

        if let Some(path) = action.file {
            let data = std::fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            planner.set_photo(SetPhoto { owner, data }).await?;
            return self.render(OperationStatus::success(format!("Stored photo for {label}")));
        }

        if let Some(reference) = action.reference {
            let data = self
                .places_client()?
                .fetch_photo(&reference)
                .await
                .ok_or_else(|| anyhow!("Could not fetch photo '{reference}'"))?;
            planner.set_photo(SetPhoto { owner, data }).await?;
            return self.render(OperationStatus::success(format!("Stored photo for {label}")));
        }

        if let Some(path) = action.output {
            let data = planner
                .photo(owner)
                .await?
                .ok_or_else(|| anyhow!("No photo stored for {label}"))?;
            write_file(&path, &data)?;
            return self.render(OperationStatus::success(format!(
                "Wrote {} bytes to {}",
                data.len(),
                path.display()
            )));
        }

        let status = if planner.clear_photo(owner).await? {
            OperationStatus::success(format!("Removed photo from {label}"))
        } else {
            OperationStatus::failure(format!("No photo stored for {label}"))
        };
        self.render(status)
    }

    pub async fn handle_places_command(&self, command: PlacesCommands) -> Result<()> {
        let client = self.places_client()?;

        match command {
            PlacesCommands::Search { query, at } => {
                let places = client.search_by_text(&query, at.lat, at.lng).await;
                self.render(Places(places))
            }
            PlacesCommands::Nearby { at } => {
                let places = client.search_nearby(at.lat, at.lng).await;
                self.render(NearbyPlaces(places))
            }
            PlacesCommands::Photo { reference, output } => {
                let data = client
                    .fetch_photo(&reference)
                    .await
                    .ok_or_else(|| anyhow!("Could not fetch photo '{reference}'"))?;
                write_file(&output, &data)?;
                self.render(OperationStatus::success(format!(
                    "Wrote {} bytes to {}",
                    data.len(),
                    output.display()
                )))
            }
        }
    }

    /// One-shot when `prompt` is non-empty, otherwise a line-based
    /// conversation on stdin. `/clear` forgets the conversation and `/quit`
    /// ends it.
    pub async fn handle_chat(&self, prompt: Vec<String>, model: Option<String>) -> Result<()> {
        let client = self.chat_client(model)?;
        info!("Chatting with model {}", client.model());
        let mut session = ChatSession::new(client);

        if !prompt.is_empty() {
            let text = prompt.join(" ");
            return match session.send(&text).await {
                Some(reply) => self.render(format!("{}\n", reply.content)),
                None => bail!("The assistant did not reply"),
            };
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match line.trim() {
                "" => continue,
                "/quit" => break,
                "/clear" => {
                    session.clear();
                    self.render(OperationStatus::success("Conversation cleared"))?;
                }
                text => match session.send(text).await {
                    Some(reply) => self.render(format!("{}\n", reply.content))?,
                    None => self.render(OperationStatus::failure("The assistant did not reply"))?,
                },
            }
        }
        debug!("Chat ended after {} messages", session.history().len());
        Ok(())
    }

    pub async fn handle_profile_command(&self, command: ProfileCommands) -> Result<()> {
        match command {
            ProfileCommands::Show => {
                let profile = self.profile_store()?.profile()?;
                self.render(profile)
            }
            ProfileCommands::Save {
                name,
                email,
                username,
            } => {
                let mut store = self.profile_store()?;
                if !validate_email(&email) {
                    eprintln!("Warning: '{email}' is not a valid email address");
                }
                store
                    .save(&name, &email, &username)
                    .context("Failed to save profile")?;
                self.render(store.profile()?)?;
                self.render(OperationStatus::success(format!(
                    "Saved profile to {}",
                    store.backend().path().display()
                )))
            }
            ProfileCommands::CheckEmail { email } => {
                let status = if validate_email(&email) {
                    OperationStatus::success(format!("'{email}' is a valid email address"))
                } else {
                    OperationStatus::failure(format!("'{email}' is not a valid email address"))
                };
                self.render(status)
            }
            ProfileCommands::Initials { name } => match derive_initials(&name) {
                Some(initials) => self.render(format!("{initials}\n")),
                None => bail!("Cannot derive initials from '{name}'"),
            },
        }
    }
}

fn owner_label(owner: PhotoOwner) -> String {
    match owner.kind {
        PhotoOwnerKind::Itinerary => format!("itinerary {}", owner.id),
        PhotoOwnerKind::PlannerItem => format!("planner item {}", owner.id),
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
}

fn trip_changes(args: &UpdateTripArgs) -> Vec<String> {
    let mut changes = Vec::new();
    if let Some(name) = &args.name {
        changes.push(format!("Name: {name}"));
    }
    if args.description.is_some() {
        changes.push("Description updated".to_string());
    }
    if let Some(start) = args.start {
        changes.push(format!("Start: {start}"));
    }
    if let Some(end) = args.end {
        changes.push(format!("End: {end}"));
    }
    changes
}

fn item_changes(args: &UpdateItemArgs) -> Vec<String> {
    let mut changes = Vec::new();
    if let Some(destination) = &args.destination {
        changes.push(format!("Destination: {destination}"));
    }
    if args.notes.is_some() {
        changes.push("Notes updated".to_string());
    }
    if let Some(start) = args.start {
        changes.push(format!("Start: {start}"));
    }
    if let Some(end) = args.end {
        changes.push(format!("End: {end}"));
    }
    changes
}
