//! Fixed topic catalog. Catalog order is load-bearing: the classifier caps
//! output at the first three matches in this order, and per-topic breakdowns
//! iterate it as-is.

pub struct TopicDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    pub subjects: &'static [&'static str],
}

/// Canonical id of the catch-all topic ingestion assigns when classification
/// comes back empty. The classifier itself never applies this fallback.
pub const CATCH_ALL_TOPIC: &str = "tech-policy";

pub const TAXONOMY: &[TopicDef] = &[
    TopicDef {
        id: "artificial-intelligence",
        name: "Artificial Intelligence",
        description: "AI systems, model regulation, and automated decision-making",
        keywords: &[
            "artificial intelligence",
            " ai ",
            "machine learning",
            "deepfake",
            "algorithmic",
            "large language model",
        ],
        subjects: &["artificial intelligence", "computer science"],
    },
    TopicDef {
        id: "cybersecurity",
        name: "Cybersecurity",
        description: "Network defense, breach disclosure, and critical infrastructure",
        keywords: &[
            "cybersecurity",
            "cyber attack",
            "cyberattack",
            "ransomware",
            "data breach",
            "critical infrastructure",
        ],
        subjects: &["computer security", "homeland security"],
    },
    TopicDef {
        id: "data-privacy",
        name: "Data Privacy",
        description: "Consumer data protection and surveillance limits",
        keywords: &[
            "privacy",
            "personal data",
            "data broker",
            "surveillance",
            "biometric",
        ],
        subjects: &["right of privacy", "consumer affairs"],
    },
    TopicDef {
        id: "antitrust",
        name: "Antitrust & Competition",
        description: "Market concentration and platform competition policy",
        keywords: &[
            "antitrust",
            "monopoly",
            "anticompetitive",
            "merger",
            "market power",
        ],
        subjects: &["competition and antitrust"],
    },
    TopicDef {
        id: "social-media",
        name: "Social Media",
        description: "Platform accountability, content moderation, and minors online",
        keywords: &[
            "social media",
            "content moderation",
            "section 230",
            "online platform",
            "kids online",
        ],
        subjects: &["internet, web applications, social media"],
    },
    TopicDef {
        id: "cryptocurrency",
        name: "Cryptocurrency",
        description: "Digital assets, stablecoins, and exchange oversight",
        keywords: &[
            "cryptocurrency",
            "crypto",
            "stablecoin",
            "digital asset",
            "blockchain",
        ],
        subjects: &["currency", "securities"],
    },
    TopicDef {
        id: "semiconductors",
        name: "Semiconductors",
        description: "Chip manufacturing, supply chains, and export controls",
        keywords: &[
            "semiconductor",
            "chips act",
            "chip manufacturing",
            "export control",
            "foundry",
        ],
        subjects: &["manufacturing", "trade restrictions"],
    },
    TopicDef {
        id: "broadband",
        name: "Broadband & Spectrum",
        description: "Connectivity buildout and spectrum allocation",
        keywords: &[
            "broadband",
            "spectrum",
            "rural internet",
            "net neutrality",
            "5g",
        ],
        subjects: &["telecommunication rates and fees", "internet and video services"],
    },
    TopicDef {
        id: "tech-policy",
        name: "Technology Policy",
        description: "General technology policy not covered by a narrower topic",
        keywords: &["technology", "innovation", "digital economy"],
        subjects: &["science, technology, communications"],
    },
];

pub fn topic_by_id(id: &str) -> Option<&'static TopicDef> {
    TAXONOMY.iter().find(|t| t.id == id)
}
