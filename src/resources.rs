// ABOUTME: Shared server state: database, prediction service, and configuration
// ABOUTME: Built once at startup and handed to every route as axum state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::intelligence::{SeededChooser, TemplateChooser, ThreadRngChooser};
use crate::services::PredictionService;
use std::sync::Arc;

/// Resources shared by all request handlers
pub struct ServerResources {
    /// Health and prediction storage
    pub database: Arc<Database>,
    /// Prediction workflow bound to the database
    pub predictions: PredictionService<Database>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire the prediction service to the database using the configured settings
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        let chooser: Arc<dyn TemplateChooser> = match config.prediction.template_seed {
            Some(seed) => Arc::new(SeededChooser::new(seed)),
            None => Arc::new(ThreadRngChooser),
        };
        Self::with_chooser(database, config, chooser)
    }

    /// Same as [`ServerResources::new`] with an explicit template chooser
    #[must_use]
    pub fn with_chooser(
        database: Database,
        config: ServerConfig,
        chooser: Arc<dyn TemplateChooser>,
    ) -> Self {
        let database = Arc::new(database);
        let predictions = PredictionService::new(Arc::clone(&database))
            .with_chooser(chooser)
            .with_history_window(config.prediction.history_window_days);

        Self {
            database,
            predictions,
            config: Arc::new(config),
        }
    }
}
