use crate::catalog::{Catalog, Category, Difficulty, GameModule, Icon};

struct CategorySeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: Icon,
    color: &'static str,
    order: u32,
}

struct GameSeed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: &'static str,
    difficulty: Difficulty,
    estimated_minutes: u32,
    learning_objectives: &'static [&'static str],
    is_premium: Option<bool>,
}

const CATEGORIES: &[CategorySeed] = &[
    CategorySeed {
        id: "circulatory",
        name: "Circulatory System",
        description: "The heart, blood, and vessels that keep everything moving",
        icon: Icon::Heart,
        color: "bg-red-500",
        order: 1,
    },
    CategorySeed {
        id: "respiratory",
        name: "Respiratory System",
        description: "How every breath brings oxygen in and carries carbon dioxide out",
        icon: Icon::Wind,
        color: "bg-sky-500",
        order: 2,
    },
    CategorySeed {
        id: "skeletal",
        name: "Skeletal System",
        description: "The 206 bones that hold you up and keep you safe",
        icon: Icon::Bone,
        color: "bg-slate-500",
        order: 3,
    },
    CategorySeed {
        id: "nervous",
        name: "Nervous System",
        description: "The brain, the spinal cord, and the body's fastest messages",
        icon: Icon::Brain,
        color: "bg-purple-500",
        order: 4,
    },
    CategorySeed {
        id: "digestive",
        name: "Digestive System",
        description: "The long journey that turns every meal into fuel",
        icon: Icon::Utensils,
        color: "bg-amber-500",
        order: 5,
    },
    CategorySeed {
        id: "muscular",
        name: "Muscular System",
        description: "The muscles that pull, push, and power every move",
        icon: Icon::Activity,
        color: "bg-green-500",
        order: 6,
    },
];

const GAMES: &[GameSeed] = &[
    GameSeed {
        id: "heart-pump-adventure",
        title: "Heart Pump Adventure",
        description: "Squeeze, pump, and race blood around the body to keep every organ happy.",
        category: "circulatory",
        difficulty: Difficulty::Beginner,
        estimated_minutes: 15,
        learning_objectives: &[
            "Name the four chambers of the heart",
            "Describe how blood moves through the body",
            "Explain why the heart beats faster during exercise",
        ],
        is_premium: None,
    },
    GameSeed {
        id: "blood-vessel-voyage",
        title: "Blood Vessel Voyage",
        description: "Steer a red blood cell through arteries, veins, and capillaries on a delivery mission.",
        category: "circulatory",
        difficulty: Difficulty::Intermediate,
        estimated_minutes: 20,
        learning_objectives: &[
            "Tell arteries, veins, and capillaries apart",
            "Follow the path oxygen takes to reach a muscle",
        ],
        is_premium: None,
    },
    GameSeed {
        id: "lung-explorer",
        title: "Lung Explorer",
        description: "Follow a breath of air from the nose all the way down to the alveoli and back out.",
        category: "respiratory",
        difficulty: Difficulty::Beginner,
        estimated_minutes: 15,
        learning_objectives: &[
            "Trace the route air takes through the airway",
            "Explain where oxygen enters the blood",
        ],
        is_premium: None,
    },
    GameSeed {
        id: "breath-balloon-lab",
        title: "Breath Balloon Lab",
        description: "Use the diaphragm to inflate a pair of balloons and see how breathing really works.",
        category: "respiratory",
        difficulty: Difficulty::Intermediate,
        estimated_minutes: 10,
        learning_objectives: &[
            "Show what the diaphragm does during a breath",
            "Compare quiet breathing with deep breathing",
        ],
        is_premium: None,
    },
    GameSeed {
        id: "bone-builder",
        title: "Bone Builder",
        description: "Assemble a skeleton bone by bone before the timer runs out.",
        category: "skeletal",
        difficulty: Difficulty::Beginner,
        estimated_minutes: 15,
        learning_objectives: &[
            "Place the major bones of the skeleton",
            "Explain what the skeleton protects",
        ],
        is_premium: None,
    },
    GameSeed {
        id: "fracture-fixers",
        title: "Fracture Fixers",
        description: "Set breaks, fit casts, and watch new bone knit itself back together.",
        category: "skeletal",
        difficulty: Difficulty::Advanced,
        estimated_minutes: 25,
        learning_objectives: &[
            "Describe the stages of bone healing",
            "Match common fractures to their treatments",
        ],
        is_premium: Some(true),
    },
    GameSeed {
        id: "neuron-navigator",
        title: "Neuron Navigator",
        description: "Fire signals across synapses to deliver a message from toe to brain.",
        category: "nervous",
        difficulty: Difficulty::Intermediate,
        estimated_minutes: 20,
        learning_objectives: &[
            "Label the parts of a neuron",
            "Explain how a signal crosses a synapse",
        ],
        is_premium: None,
    },
    GameSeed {
        id: "reflex-race",
        title: "Reflex Race",
        description: "Test your reaction time and learn the shortcut signals take in a reflex.",
        category: "nervous",
        difficulty: Difficulty::Beginner,
        estimated_minutes: 10,
        learning_objectives: &[
            "Explain why reflexes skip the brain",
            "Measure and compare reaction times",
        ],
        is_premium: None,
    },
    GameSeed {
        id: "digestion-quest",
        title: "Digestion Quest",
        description: "Guide a bite of food on its long journey from plate to exit.",
        category: "digestive",
        difficulty: Difficulty::Beginner,
        estimated_minutes: 15,
        learning_objectives: &[
            "Order the organs of the digestive tract",
            "Describe what happens to food in the stomach",
        ],
        is_premium: None,
    },
    GameSeed {
        id: "enzyme-factory",
        title: "Enzyme Factory",
        description: "Run the chemical crew that breaks every meal down into fuel.",
        category: "digestive",
        difficulty: Difficulty::Advanced,
        estimated_minutes: 25,
        learning_objectives: &[
            "Match enzymes to the foods they break down",
            "Explain why the small intestine is so long",
        ],
        is_premium: Some(true),
    },
    GameSeed {
        id: "muscle-machine",
        title: "Muscle Machine",
        description: "Pair up muscles and bones to lift, jump, and throw.",
        category: "muscular",
        difficulty: Difficulty::Intermediate,
        estimated_minutes: 20,
        learning_objectives: &[
            "Show how muscles pull on bones to move joints",
            "Name the muscle pairs behind a jump",
        ],
        is_premium: None,
    },
    GameSeed {
        id: "stamina-sprint",
        title: "Stamina Sprint",
        description: "Train for the big race and watch exercise grow muscle power and lung capacity.",
        category: "muscular",
        difficulty: Difficulty::Beginner,
        estimated_minutes: 15,
        learning_objectives: &[
            "Explain how training makes muscles stronger",
            "Describe how the body fuels a sprint",
        ],
        is_premium: None,
    },
];

/// The shipped catalog. Content lives here until a content-service
/// integration replaces it.
pub fn builtin_catalog() -> Catalog {
    let categories = CATEGORIES
        .iter()
        .map(|seed| Category {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            icon: seed.icon,
            color: seed.color.to_string(),
            order: seed.order,
        })
        .collect();

    let games = GAMES
        .iter()
        .map(|seed| GameModule {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            thumbnail: format!("/assets/games/{}.jpg", seed.id),
            category: seed.category.to_string(),
            difficulty: seed.difficulty,
            estimated_minutes: seed.estimated_minutes,
            learning_objectives: seed
                .learning_objectives
                .iter()
                .map(|objective| objective.to_string())
                .collect(),
            is_premium: seed.is_premium,
        })
        .collect();

    Catalog::new(categories, games).expect("built-in catalog is internally consistent")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_shape() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.categories().len(), 6);
        assert_eq!(catalog.game_count(), 12);
        assert!(catalog.game("heart-pump-adventure").is_some());
        assert!(catalog.game("lung-explorer").is_some());
    }

    #[test]
    fn every_game_references_a_real_category() {
        let catalog = builtin_catalog();
        for game in catalog.games() {
            assert!(
                catalog.category(&game.category).is_some(),
                "{} references unknown category {}",
                game.id,
                game.category
            );
        }
    }

    #[test]
    fn circulatory_has_exactly_two_games() {
        let catalog = builtin_catalog();
        let count = catalog
            .games()
            .iter()
            .filter(|game| game.category == "circulatory")
            .count();
        assert_eq!(count, 2);
    }
}
