//! Reference data: clients, their job requisitions and the talents on each.
//!
//! The form only ever reads from a [`ReferenceData`] provider. [`MockDirectory`]
//! is the in-memory catalog the form ships with; a real directory service can
//! stand in for it without touching the form.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Talent {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub req_id: String, // requisition code shown next to the title
    pub talents: Vec<Talent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub jobs: Vec<Job>,
}

impl Talent {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Job {
    pub fn new(id: &str, title: &str, req_id: &str, talents: Vec<Talent>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            req_id: req_id.into(),
            talents,
        }
    }
    /// The talent roster for this requisition.
    pub fn talents(&self) -> &[Talent] {
        &self.talents
    }
}

impl Client {
    pub fn new(id: &str, name: &str, jobs: Vec<Job>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            jobs,
        }
    }
}

/// Read-only lookup of clients and their jobs.
///
/// Unknown identifiers resolve to `None` or an empty slice, never a panic.
pub trait ReferenceData {
    fn clients(&self) -> &[Client];

    fn client(&self, client_id: &str) -> Option<&Client> {
        self.clients().iter().find(|c| c.id == client_id)
    }

    fn jobs_for(&self, client_id: &str) -> &[Job] {
        self.client(client_id).map(|c| c.jobs.as_slice()).unwrap_or(&[])
    }

    fn job(&self, client_id: &str, job_id: &str) -> Option<&Job> {
        self.jobs_for(client_id).iter().find(|j| j.id == job_id)
    }

    fn client_name(&self, client_id: &str) -> Option<&str> {
        self.client(client_id).map(|c| c.name.as_str())
    }
}

/// Static catalog used until a directory service is wired in.
#[derive(Debug, Clone)]
pub struct MockDirectory {
    clients: Vec<Client>,
}

impl MockDirectory {
    pub fn new(clients: Vec<Client>) -> Self {
        Self { clients }
    }
}

impl Default for MockDirectory {
    fn default() -> Self {
        Self::new(vec![
            Client::new(
                "c1",
                "Collabera - Collabera Inc",
                vec![
                    Job::new(
                        "job1",
                        "Application Development",
                        "OWNAI_234",
                        vec![
                            Talent::new("t1", "Monika Goyal Test"),
                            Talent::new("t2", "Shaili Khatri"),
                            Talent::new("t3", "Rahul Singh"),
                        ],
                    ),
                    Job::new(
                        "job2",
                        "Business Administrator",
                        "CLK_12880",
                        vec![
                            Talent::new("t4", "Amit Sharma"),
                            Talent::new("t5", "Neha Patel"),
                        ],
                    ),
                ],
            ),
            Client::new(
                "c2",
                "Yuvia Solutions",
                vec![Job::new(
                    "job3",
                    "Frontend Developer",
                    "YV_001",
                    vec![
                        Talent::new("t6", "Sonal Verma"),
                        Talent::new("t7", "Karan Jain"),
                    ],
                )],
            ),
        ])
    }
}

impl ReferenceData for MockDirectory {
    fn clients(&self) -> &[Client] {
        &self.clients
    }
}
