/// ProgressReporter port for user-facing status while requests are in flight
///
/// Output goes to stderr so it never mixes with a report on stdout.
pub trait ProgressReporter {
    /// Reports a plain status message
    fn report(&self, message: &str);

    /// Shows a loading indicator for an outstanding request
    fn report_loading(&self, message: &str);

    /// Clears the loading indicator without printing anything
    fn finish_loading(&self);

    /// Reports an error or warning message, clearing any loading indicator
    fn report_error(&self, message: &str);

    /// Reports completion of an operation, clearing any loading indicator
    fn report_completion(&self, message: &str);
}
