//! CLI module for shiftcert
//!
//! Provides the command-line interface using clap.

pub mod commands;
mod workspace;

pub use workspace::{print_json, Workspace};

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::schemas::ShiftKey;

/// Shiftcert - track restaurant trainees through their certification shifts
#[derive(Parser, Debug)]
#[command(name = "shiftcert")]
#[command(version)]
#[command(about = "Track trainees through scheduled training shifts, sign-offs and certification")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory to search upwards from for the .shiftcert data directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,
}

/// Identifies one shift of one trainee
#[derive(Args, Debug, Clone)]
pub struct ShiftRef {
    /// Trainee id, e.g. downtown_00123
    pub trainee: String,

    /// Shift key (follow, reverse_1..reverse_4, food_running, certification)
    pub shift: ShiftKey,
}

/// Optional feedback edits; an empty string clears the field
#[derive(Args, Debug, Clone, Default)]
pub struct FeedbackArgs {
    #[arg(long)]
    pub strengths: Option<String>,

    #[arg(long)]
    pub opportunities: Option<String>,

    #[arg(long)]
    pub goals_next: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the .shiftcert data directory in the current directory
    Init {
        /// Overwrite an existing config.json
        #[arg(long)]
        force: bool,
    },

    /// Add a trainee
    AddTrainee {
        #[arg(long)]
        store: String,

        #[arg(long)]
        employee: String,

        #[arg(long)]
        name: String,
    },

    /// List trainees with their certification progress
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Only trainees of this store
        #[arg(long)]
        store: Option<String>,

        /// Include archived trainees
        #[arg(long)]
        archived: bool,
    },

    /// Show a trainee's shifts and certification status
    Show {
        trainee: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the history of one shift
    Audit {
        #[command(flatten)]
        target: ShiftRef,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set when a shift takes place and, optionally, its trainer
    Schedule {
        #[command(flatten)]
        target: ShiftRef,

        /// RFC 3339 timestamp; omit to unschedule
        #[arg(long)]
        when: Option<DateTime<Utc>>,

        /// Assign this trainer directly
        #[arg(long)]
        trainer: Option<String>,
    },

    /// Assign a trainer to a shift directly
    Assign {
        #[command(flatten)]
        target: ShiftRef,

        #[arg(long)]
        trainer: String,
    },

    /// List scheduled shifts that still need a trainer
    Coverage {
        #[arg(long)]
        store: String,

        /// Include shifts with a claim awaiting approval
        #[arg(long)]
        include_pending: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Claim an open shift as a trainer
    Claim {
        #[command(flatten)]
        target: ShiftRef,

        #[arg(long)]
        trainer: String,
    },

    /// Approve the pending claim on a shift
    Approve {
        #[command(flatten)]
        target: ShiftRef,
    },

    /// Reject the pending claim on a shift
    RejectClaim {
        #[command(flatten)]
        target: ShiftRef,
    },

    /// List a trainer's claims awaiting approval
    Claims {
        #[arg(long)]
        trainer: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a checklist item, or show the checklist when no item is given
    Checklist {
        #[command(flatten)]
        target: ShiftRef,

        /// Template item id
        item: Option<String>,

        /// Item value: true/false, a rating, text or a dropdown option
        value: Option<String>,

        #[arg(long, default_value = "unknown")]
        author: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit shift feedback
    Feedback {
        #[command(flatten)]
        target: ShiftRef,

        #[command(flatten)]
        feedback: FeedbackArgs,
    },

    /// Trainer sign-off for a shift
    SignTrainer {
        #[command(flatten)]
        target: ShiftRef,

        /// Signing trainer
        #[arg(long)]
        trainer: String,

        #[arg(long)]
        knowledge: Option<u8>,

        #[arg(long)]
        execution: Option<u8>,

        #[arg(long)]
        confidence: Option<u8>,

        #[command(flatten)]
        feedback: FeedbackArgs,
    },

    /// Manager sign-off for a shift
    SignManager {
        #[command(flatten)]
        target: ShiftRef,

        /// Signing manager
        #[arg(long)]
        manager: String,
    },

    /// Archive a trainee
    Archive { trainee: String },

    /// Clear a trainee's schedule and checklists
    Restart { trainee: String },

    /// Add a note to a trainee
    Note {
        trainee: String,

        text: String,

        #[arg(long, default_value = "unknown")]
        author: String,
    },

    /// Record a manual certification
    VerbalCert {
        trainee: String,

        /// Manager recording the certification
        #[arg(long)]
        by: String,
    },

    /// Record a knowledge test attempt
    RecordTest {
        trainee: String,

        test: String,

        #[arg(long)]
        score: u8,

        #[arg(long)]
        passed: bool,
    },

    /// Show a trainer's effectiveness score
    Effectiveness {
        trainer: String,

        /// Only trainees of this store
        #[arg(long)]
        store: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank the trainers on a store roster
    Leaderboard {
        #[arg(long)]
        store: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
