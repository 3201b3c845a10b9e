/// ProgressReporter port for reporting progress during a traversal
///
/// Remote listings and manifest fetches can take several seconds per
/// machine; this port keeps the user informed on stderr without
/// interfering with report output on stdout.
pub trait ProgressReporter {
    /// Reports a status message (e.g. "Scanning prod:openstack machine 3")
    fn report(&self, message: &str);

    /// Reports progress through a known number of steps
    ///
    /// # Arguments
    /// * `current` - Steps completed so far
    /// * `total` - Total expected steps
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a failure that did not abort the traversal
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
