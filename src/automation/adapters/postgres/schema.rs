//! Diesel schema for automation persistence.

diesel::table! {
    /// One status document per automation attempt.
    automation_statuses (id) {
        /// Status record identifier.
        id -> Int8,
        /// Owning account.
        account_id -> Int8,
        /// User who started the run.
        user_id -> Int8,
        /// Outreach platform.
        platform_id -> Int8,
        /// Pipeline stage.
        stage_id -> Int8,
        /// Creation timestamp.
        created -> Timestamptz,
        /// Status document.
        status -> Jsonb,
    }
}

diesel::table! {
    /// Lead-status lookup.
    lead_statuses (id) {
        /// Status identifier.
        id -> Int8,
        /// Display name.
        #[max_length = 100]
        name -> Varchar,
    }
}

diesel::table! {
    /// Leads, read-only from the automation subsystem.
    leads (id) {
        /// Lead identifier.
        id -> Int8,
        /// Current pipeline stage.
        stage_id -> Int8,
        /// Current lead status.
        status -> Nullable<Int8>,
        /// Follow-up date.
        followup_date -> Nullable<Date>,
    }
}

diesel::table! {
    /// Action types with default configuration.
    features (id) {
        /// Feature identifier.
        id -> Int8,
        /// Action code, used as the action name.
        #[max_length = 100]
        code -> Varchar,
        /// Default configuration JSON text.
        default_config -> Nullable<Text>,
    }
}

diesel::table! {
    /// Ordered actions configured per pipeline stage.
    pipeline_stage_actions (id) {
        /// Action identifier.
        id -> Int8,
        /// Owning stage.
        stage_id -> Int8,
        /// Implementing feature.
        feature_id -> Int8,
        /// Explicit position within the stage.
        sort_order -> Int4,
        /// Per-action configuration JSON text.
        config -> Nullable<Text>,
    }
}

diesel::joinable!(pipeline_stage_actions -> features (feature_id));

diesel::allow_tables_to_appear_in_same_query!(features, pipeline_stage_actions);
