/// An icon set offered in the collection picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedCollection {
    pub prefix: &'static str,
    pub title: &'static str,
}

pub const FEATURED_COLLECTIONS: &[FeaturedCollection] = &[
    FeaturedCollection { prefix: "lucide", title: "Lucide" },
    FeaturedCollection { prefix: "heroicons", title: "Heroicons" },
    FeaturedCollection { prefix: "mdi", title: "Material Design Icons" },
    FeaturedCollection { prefix: "tabler", title: "Tabler Icons" },
    FeaturedCollection { prefix: "ph", title: "Phosphor Icons" },
    FeaturedCollection { prefix: "ri", title: "Remix Icon" },
    FeaturedCollection { prefix: "carbon", title: "Carbon Icons" },
    FeaturedCollection { prefix: "fluent", title: "Fluent UI Icons" },
];

pub fn featured(prefix: &str) -> Option<&'static FeaturedCollection> {
    FEATURED_COLLECTIONS.iter().find(|c| c.prefix == prefix)
}
