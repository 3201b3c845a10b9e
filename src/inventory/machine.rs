use super::commands;
use crate::cve_audit::domain::{PackageMap, ScanResult};
use crate::cve_audit::policies::ReleaseCodenamePolicy;
use crate::cve_audit::services::{ManifestParser, ScanPipeline};
use crate::ports::outbound::{CommandOutput, ReferenceDataProvider, RemoteSession, VulnerabilityScanner};
use crate::shared::shell::slugify;
use crate::shared::Result;
use anyhow::Context;
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

/// A machine of a Juju model
///
/// Hostname and release codename are fetched once and cached; the manifest
/// and everything derived from it is fetched again on every access.
pub struct Machine {
    id: String,
    model: String,
    session: Rc<dyn RemoteSession>,
    hostname: OnceCell<String>,
    codename: OnceCell<String>,
}

impl Machine {
    /// `model` is the owning model's `controller:model` display identity.
    pub(crate) fn new(id: String, model: String, session: Rc<dyn RemoteSession>) -> Self {
        Self {
            id,
            model,
            session,
            hostname: OnceCell::new(),
            codename: OnceCell::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display identity of the owning model
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Command-line style reference, e.g. `-m prod:openstack 3`
    pub fn reference(&self) -> String {
        format!("-m {} {}", self.model, self.id)
    }

    /// Filesystem and URL safe identifier derived from model and machine id
    pub fn slug(&self) -> String {
        slugify(&format!("{}.{}", self.model, self.id))
    }

    /// Runs `command` on this machine through `juju ssh`
    pub fn run(&self, command: &str) -> Result<CommandOutput> {
        self.session
            .run(&commands::on_machine(&self.model, &self.id, command))
            .with_context(|| format!("Failed to run '{}' on machine {}", command, self.reference()))
    }

    pub fn hostname(&self) -> Result<&str> {
        if let Some(hostname) = self.hostname.get() {
            return Ok(hostname);
        }
        let fetched = self.run(commands::HOSTNAME)?.stdout.trim().to_string();
        Ok(self.hostname.get_or_init(|| fetched))
    }

    /// Raw `dpkg-query -W` listing; never cached
    pub fn manifest(&self) -> Result<String> {
        Ok(self.run(commands::MANIFEST)?.stdout)
    }

    pub fn packages(&self) -> Result<PackageMap> {
        let manifest = self.manifest()?;
        ManifestParser::parse_packages(&manifest)
            .with_context(|| format!("Invalid manifest for machine {}", self.reference()))
    }

    /// Ubuntu release codename, inferred once from the installed packages
    pub fn codename(&self) -> Result<&str> {
        if let Some(codename) = self.codename.get() {
            return Ok(codename);
        }
        self.codename_from(&self.packages()?)
    }

    fn codename_from(&self, packages: &PackageMap) -> Result<&str> {
        if let Some(codename) = self.codename.get() {
            return Ok(codename);
        }
        let resolved = ReleaseCodenamePolicy::resolve(packages)
            .with_context(|| format!("Machine {}", self.reference()))?;
        Ok(self.codename.get_or_init(|| resolved))
    }

    /// Scans the installed packages; recomputed on every call
    pub fn cves<P, S>(&self, provider: &P, scanner: &S) -> Result<Vec<ScanResult>>
    where
        P: ReferenceDataProvider,
        S: VulnerabilityScanner<Data = P::Data>,
    {
        let packages = self.packages()?;
        let codename = self.codename_from(&packages)?.to_string();
        tracing::debug!(machine = %self.reference(), %codename, packages = packages.len(), "scanning");
        ScanPipeline::scan(provider, scanner, &codename, &packages)
            .with_context(|| format!("CVE scan failed for machine {}", self.reference()))
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cve_audit::domain::Priority;
    use crate::inventory::testing::ScriptedSession;
    use std::cell::Cell;
    use std::sync::Arc;

    const MODEL: &str = "prod:admin/openstack";
    const HOSTNAME_CMD: &str = "juju ssh --model=prod:admin/openstack 3 -- hostname";
    const MANIFEST_CMD: &str = "juju ssh --model=prod:admin/openstack 3 -- dpkg-query -W";
    const FOCAL_MANIFEST: &str = "openssl\t1.1.1f-1ubuntu2\nupdate-manager-core\t1:20.04.10\n";

    fn machine(session: &Rc<ScriptedSession>) -> Machine {
        let session: Rc<dyn RemoteSession> = session.clone();
        Machine::new("3".to_string(), MODEL.to_string(), session)
    }

    #[test]
    fn test_reference_and_slug() {
        let session = Rc::new(ScriptedSession::new());
        let machine = machine(&session);
        assert_eq!(machine.reference(), "-m prod:admin/openstack 3");
        assert_eq!(machine.slug(), "prod-admin-openstack-3");
        assert_eq!(machine.to_string(), "3");
    }

    #[test]
    fn test_hostname_is_trimmed_and_cached() {
        let session = Rc::new(ScriptedSession::new().respond(HOSTNAME_CMD, "node-3\n"));
        let machine = machine(&session);
        assert_eq!(machine.hostname().unwrap(), "node-3");
        assert_eq!(machine.hostname().unwrap(), "node-3");
        assert_eq!(session.count(HOSTNAME_CMD), 1);
    }

    #[test]
    fn test_manifest_is_not_cached() {
        let session = Rc::new(ScriptedSession::new().respond(MANIFEST_CMD, FOCAL_MANIFEST));
        let machine = machine(&session);
        machine.manifest().unwrap();
        machine.packages().unwrap();
        assert_eq!(session.count(MANIFEST_CMD), 2);
    }

    #[test]
    fn test_codename_is_cached() {
        let session = Rc::new(ScriptedSession::new().respond(MANIFEST_CMD, FOCAL_MANIFEST));
        let machine = machine(&session);
        assert_eq!(machine.codename().unwrap(), "focal");
        assert_eq!(machine.codename().unwrap(), "focal");
        assert_eq!(session.count(MANIFEST_CMD), 1);
    }

    #[test]
    fn test_codename_failure_names_machine() {
        let session = Rc::new(ScriptedSession::new().respond(MANIFEST_CMD, "bash\t5.0-6ubuntu1\n"));
        let err = machine(&session).codename().unwrap_err();
        assert!(format!("{:#}", err).contains("-m prod:admin/openstack 3"));
        assert!(format!("{:#}", err).contains("update-manager-core"));
    }

    #[test]
    fn test_run_failure_carries_context() {
        let session = Rc::new(ScriptedSession::new().fail(HOSTNAME_CMD, 1));
        let err = machine(&session).hostname().unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("hostname"));
        assert!(message.contains("exit code 1"));
    }

    struct SeriesProvider {
        calls: Cell<usize>,
    }

    impl ReferenceDataProvider for SeriesProvider {
        type Data = String;

        fn fetch(&self, series: &str) -> Result<Arc<String>> {
            self.calls.set(self.calls.get() + 1);
            Ok(Arc::new(series.to_string()))
        }
    }

    struct PackageScanner;

    impl VulnerabilityScanner for PackageScanner {
        type Data = String;

        fn scan(&self, codename: &str, data: &String, packages: &PackageMap) -> Result<Vec<ScanResult>> {
            assert_eq!(codename, data);
            Ok(packages
                .iter()
                .map(|(name, _)| ScanResult::new(format!("CVE-{}", name), Priority::High, name, None, codename))
                .collect())
        }
    }

    #[test]
    fn test_cves_are_recomputed() {
        let session = Rc::new(ScriptedSession::new().respond(MANIFEST_CMD, FOCAL_MANIFEST));
        let machine = machine(&session);
        let provider = SeriesProvider { calls: Cell::new(0) };

        let first = machine.cves(&provider, &PackageScanner).unwrap();
        let second = machine.cves(&provider, &PackageScanner).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].repository(), "focal");
        // the codename comes from the first scan's manifest
        assert_eq!(session.count(MANIFEST_CMD), 2);
        assert_eq!(provider.calls.get(), 2);
    }
}
