/// Validate that every stage's codes are registered
pub fn validate_pipeline() -> Result<(), String> {
    log_debug!("Validating pipeline configuration");

    crate::logging::config::validate_config()?;
    crate::file_processor::init_file_processor_logging()?;
    crate::automaton::init_automaton_logging()?;
    crate::lexical::init_lexical_analysis_logging()?;
    crate::syntax::init_syntax_logging()?;

    log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "stages_validated" => 4
    );

    Ok(())
}
