use super::kind::EntityKind;

/// How a relation is realized in storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// Child rows carry this attribute pointing at the parent id
    ForeignKey(&'static str),
    /// Place↔Amenity join with no payload
    Association,
}

/// Navigable one-to-many and many-to-many relationships
///
/// Each backend resolves a relation behind `Storage::related`; the file
/// backend by linear scan, the relational backend by query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    StateCities,
    CityPlaces,
    UserPlaces,
    UserReviews,
    PlaceReviews,
    PlaceAmenities,
    AmenityPlaces,
}

impl Relation {
    pub fn all() -> &'static [Relation] {
        &[
            Self::StateCities,
            Self::CityPlaces,
            Self::UserPlaces,
            Self::UserReviews,
            Self::PlaceReviews,
            Self::PlaceAmenities,
            Self::AmenityPlaces,
        ]
    }

    /// Type whose id is passed to `related`
    pub fn parent(&self) -> EntityKind {
        match self {
            Self::StateCities => EntityKind::State,
            Self::CityPlaces => EntityKind::City,
            Self::UserPlaces | Self::UserReviews => EntityKind::User,
            Self::PlaceReviews | Self::PlaceAmenities => EntityKind::Place,
            Self::AmenityPlaces => EntityKind::Amenity,
        }
    }

    /// Type of the returned entities
    pub fn child(&self) -> EntityKind {
        match self {
            Self::StateCities => EntityKind::City,
            Self::CityPlaces | Self::UserPlaces | Self::AmenityPlaces => EntityKind::Place,
            Self::UserReviews | Self::PlaceReviews => EntityKind::Review,
            Self::PlaceAmenities => EntityKind::Amenity,
        }
    }

    pub fn link(&self) -> Link {
        match self {
            Self::StateCities => Link::ForeignKey("state_id"),
            Self::CityPlaces => Link::ForeignKey("city_id"),
            Self::UserPlaces | Self::UserReviews => Link::ForeignKey("user_id"),
            Self::PlaceReviews => Link::ForeignKey("place_id"),
            Self::PlaceAmenities | Self::AmenityPlaces => Link::Association,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::StateCities => "state.cities",
            Self::CityPlaces => "city.places",
            Self::UserPlaces => "user.places",
            Self::UserReviews => "user.reviews",
            Self::PlaceReviews => "place.reviews",
            Self::PlaceAmenities => "place.amenities",
            Self::AmenityPlaces => "amenity.places",
        }
    }
}
