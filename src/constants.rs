pub mod images {

    /// Sentinel returned by cover lookups when nothing usable was found.
    /// Treated as "absent" everywhere and never persisted as a resolved URL.
    pub const PLACEHOLDER_COVER: &str = "https://via.placeholder.com/300x450.png?text=Sem+Capa";

    #[must_use]
    pub fn is_placeholder(url: &str) -> bool {
        url.contains("via.placeholder.com")
    }
}

pub mod icons {

    /// Status glyph names, keyed by the lower-cased status value.
    /// Unknown statuses render without a glyph.
    #[must_use]
    pub fn status_icon(status: &str) -> &'static str {
        match status.to_lowercase().as_str() {
            "concluido" => "fa-check",
            "assistir" | "ler" => "fa-bookmark",
            "vendo" | "lendo" => "fa-eye",
            "dropado" => "fa-eye-slash",
            "cancelado" => "fa-ghost",
            "conheço" => "fa-question",
            _ => "",
        }
    }

    #[must_use]
    pub fn opinion_icon(opinion: &str) -> &'static str {
        match opinion.to_lowercase().as_str() {
            "favorito" => "fa-star",
            "muito bom" => "fa-face-laugh-beam",
            "recomendo" => "fa-thumbs-up",
            "bom" => "fa-smile",
            "mediano" => "fa-meh",
            "ruim" => "fa-frown",
            "horrivel" => "fa-skull-crossbones",
            "não vi" => "fa-question-circle",
            _ => "",
        }
    }
}

pub mod tags {

    /// Curated tag vocabulary offered by the entry form, grouped for display.
    pub const TAG_GROUPS: &[(&str, &[&str])] = &[
        (
            "Romance",
            &[
                "Romance",
                "Beijo",
                "Namoro",
                "Casamento",
                "Morar Juntos",
                "Noivado",
                "Romance do bom",
                "Fez Filho(s)",
                "Gravidez",
            ],
        ),
        (
            "Ação & Aventura",
            &[
                "Ação",
                "Poder",
                "Aventura",
                "Overpower",
                "Dungeon",
                "Mecha",
                "Demônio",
                "Monstros",
            ],
        ),
        (
            "Fantasia & Sobrenatural",
            &[
                "Magia",
                "Fantasia",
                "Sobrenatural",
                "Deuses",
                "Reencarnar",
                "Medieval",
            ],
        ),
        ("Drama", &["Drama", "Tristeza", "Cringe"]),
        ("SciFi & Tech", &["SciFi", "VR/Jogo", "System"]),
        (
            "Slice of Life",
            &["Slice of Life", "Vida Escolar", "Dormitorios"],
        ),
        ("Comédia", &["Comédia", "Fofo"]),
        ("Terror", &["Terror", "Gore"]),
        ("Esporte & Música", &["Esporte", "Musical"]),
        (
            "Gênero",
            &["Shounen", "Shoujo-ai", "Mahou Shoujo", "Yuri", "Gender bender"],
        ),
        (
            "Adulto",
            &[
                "Ecchi",
                "Nudez",
                "Sexo",
                "Incesto",
                "NTR",
                "Harem",
                "Nudez Nippleless",
            ],
        ),
        ("Isekai", &["Isekai", "MC Vilão"]),
        ("Personagem", &["Kemonomimi", "Goat"]),
    ];

    /// Flattened, sorted view of the whole vocabulary.
    #[must_use]
    pub fn all_tags() -> Vec<&'static str> {
        let mut all: Vec<&'static str> = TAG_GROUPS
            .iter()
            .flat_map(|(_, tags)| tags.iter().copied())
            .collect();
        all.sort_unstable();
        all
    }
}

pub mod limits {

    /// Results fetched per AniList page; the cover rotation cycles through them.
    pub const LOOKUP_PAGE_SIZE: usize = 5;

    /// Delay between consecutive AniList calls during bulk refresh.
    pub const REFRESH_PACING_MS: u64 = 1000;
}
