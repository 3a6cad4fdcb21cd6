//! Compound catalog: the binary-VLE compounds the reference tables cover.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompoundCatalogEntry {
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
}

impl CompoundCatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.canonical_id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }

    /// Exact, case-insensitive match on id, display name or alias.
    pub fn is_named(&self, name: &str) -> bool {
        let name = name.trim();
        self.canonical_id.eq_ignore_ascii_case(name)
            || self.display_name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    }
}

const COMPOUND_CATALOG: [CompoundCatalogEntry; 23] = [
    CompoundCatalogEntry {
        canonical_id: "Acetonitrile",
        display_name: "Acetonitrile",
        aliases: &["mecn", "ch3cn"],
    },
    CompoundCatalogEntry {
        canonical_id: "Acetone",
        display_name: "Acetone",
        aliases: &["propanone", "2-propanone"],
    },
    CompoundCatalogEntry {
        canonical_id: "1,2-Ethanediol",
        display_name: "Ethylene glycol",
        aliases: &["ethylene glycol", "meg"],
    },
    CompoundCatalogEntry {
        canonical_id: "Ethanol",
        display_name: "Ethanol",
        aliases: &["etoh", "ethyl alcohol"],
    },
    CompoundCatalogEntry {
        canonical_id: "Diethyl ether",
        display_name: "Diethyl ether",
        aliases: &["ether", "ethoxyethane"],
    },
    CompoundCatalogEntry {
        canonical_id: "Ethyl acetate",
        display_name: "Ethyl acetate",
        aliases: &["etoac"],
    },
    CompoundCatalogEntry {
        canonical_id: "Benzene",
        display_name: "Benzene",
        aliases: &["c6h6"],
    },
    CompoundCatalogEntry {
        canonical_id: "1-Butanol",
        display_name: "1-Butanol",
        aliases: &["n-butanol", "butanol"],
    },
    CompoundCatalogEntry {
        canonical_id: "Chloroform",
        display_name: "Chloroform",
        aliases: &["trichloromethane", "chcl3"],
    },
    CompoundCatalogEntry {
        canonical_id: "Cyclohexane",
        display_name: "Cyclohexane",
        aliases: &["c6h12"],
    },
    CompoundCatalogEntry {
        canonical_id: "Acetic acid butyl ester",
        display_name: "Butyl acetate",
        aliases: &["butyl acetate", "n-butyl acetate"],
    },
    CompoundCatalogEntry {
        canonical_id: "Acetic acid",
        display_name: "Acetic acid",
        aliases: &["ethanoic acid"],
    },
    CompoundCatalogEntry {
        canonical_id: "Hexane",
        display_name: "n-Hexane",
        aliases: &["n-hexane"],
    },
    CompoundCatalogEntry {
        canonical_id: "2-Propanol",
        display_name: "2-Propanol",
        aliases: &["isopropanol", "ipa"],
    },
    CompoundCatalogEntry {
        canonical_id: "1-Hexene",
        display_name: "1-Hexene",
        aliases: &["hexene"],
    },
    CompoundCatalogEntry {
        canonical_id: "Methanol",
        display_name: "Methanol",
        aliases: &["meoh", "methyl alcohol"],
    },
    CompoundCatalogEntry {
        canonical_id: "Tetrahydrofuran",
        display_name: "Tetrahydrofuran",
        aliases: &["thf"],
    },
    CompoundCatalogEntry {
        canonical_id: "Water",
        display_name: "Water",
        aliases: &["h2o"],
    },
    CompoundCatalogEntry {
        canonical_id: "m-Xylene",
        display_name: "m-Xylene",
        aliases: &["1,3-dimethylbenzene"],
    },
    CompoundCatalogEntry {
        canonical_id: "p-Xylene",
        display_name: "p-Xylene",
        aliases: &["1,4-dimethylbenzene"],
    },
    CompoundCatalogEntry {
        canonical_id: "N-Methyl-2-pyrrolidone",
        display_name: "N-Methyl-2-pyrrolidone",
        aliases: &["nmp"],
    },
    CompoundCatalogEntry {
        canonical_id: "1,3-Butadiene",
        display_name: "1,3-Butadiene",
        aliases: &["butadiene"],
    },
    CompoundCatalogEntry {
        canonical_id: "Hexadecane",
        display_name: "n-Hexadecane",
        aliases: &["cetane", "n-hexadecane"],
    },
];

pub fn compound_catalog() -> &'static [CompoundCatalogEntry] {
    &COMPOUND_CATALOG
}

pub fn filter_compound_catalog(query: &str) -> Vec<CompoundCatalogEntry> {
    COMPOUND_CATALOG
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

/// Resolve user input to a catalog entry.
pub fn resolve_compound(name: &str) -> Option<&'static CompoundCatalogEntry> {
    COMPOUND_CATALOG.iter().find(|entry| entry.is_named(name))
}
