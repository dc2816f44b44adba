//! Structures de données de l'API SponsorBlock

use serde::{Deserialize, Deserializer, Serialize};

/// Catégorie de segment signalée par la communauté
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Publicité ou sponsoring intégré
    Sponsor,
    /// Auto-promotion (merchandising, dons, réseaux sociaux)
    Selfpromo,
    /// Rappel d'abonnement ou demande d'interaction
    Interaction,
    /// Introduction sans contenu
    Intro,
    /// Générique ou carte de fin
    Outro,
    /// Passage précédemment diffusé (récapitulatif)
    Preview,
    /// Partie hors sujet d'une vidéo musicale
    MusicOfftopic,
    /// Moment fort signalé par la communauté
    PoiHighlight,
    /// Blague ou passage dispensable
    Filler,
    /// Catégorie inconnue du client
    #[serde(other)]
    Unknown,
}

impl Category {
    /// Nom de la catégorie tel qu'attendu par l'API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sponsor => "sponsor",
            Self::Selfpromo => "selfpromo",
            Self::Interaction => "interaction",
            Self::Intro => "intro",
            Self::Outro => "outro",
            Self::Preview => "preview",
            Self::MusicOfftopic => "music_offtopic",
            Self::PoiHighlight => "poi_highlight",
            Self::Filler => "filler",
            Self::Unknown => "unknown",
        }
    }
}

/// Action recommandée pour un segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Sauter le segment entièrement
    Skip,
    /// Couper le son pendant le segment
    Mute,
    /// Le segment couvre la vidéo entière
    Full,
    /// Point d'entrée recommandé (faits saillants)
    Poi,
    /// Action inconnue du client
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Nom de l'action tel qu'attendu par l'API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Mute => "mute",
            Self::Full => "full",
            Self::Poi => "poi",
            Self::Unknown => "unknown",
        }
    }
}

/// Segment à sauter dans une vidéo
///
/// Les bornes arrivent de l'API sous la forme d'un tableau `segment` à deux
/// éléments. Elles sont repliées ici en deux champs `start` et `end` en
/// secondes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Identifiant unique du signalement
    #[serde(rename = "UUID")]
    pub uuid: String,
    /// Catégorie du segment
    pub category: Category,
    /// Action recommandée
    #[serde(rename = "actionType")]
    pub action: Action,
    /// Bornes du segment en secondes
    #[serde(rename = "segment", deserialize_with = "bounds_from_array")]
    #[serde(serialize_with = "bounds_to_array")]
    pub bounds: SegmentBounds,
}

/// Bornes d'un segment en secondes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentBounds {
    pub start: f64,
    pub end: f64,
}

impl Segment {
    /// Début du segment en secondes
    pub fn start(&self) -> f64 {
        self.bounds.start
    }

    /// Fin du segment en secondes
    pub fn end(&self) -> f64 {
        self.bounds.end
    }

    /// Durée du segment en secondes
    pub fn duration(&self) -> f64 {
        (self.bounds.end - self.bounds.start).max(0.0)
    }

    /// Teste si une position de lecture tombe dans le segment
    pub fn contains(&self, position: f64) -> bool {
        position >= self.bounds.start && position < self.bounds.end
    }
}

fn bounds_from_array<'de, D>(deserializer: D) -> Result<SegmentBounds, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<f64> = Vec::deserialize(deserializer)?;
    match values.as_slice() {
        [start, end, ..] => Ok(SegmentBounds {
            start: *start,
            end: *end,
        }),
        _ => Err(serde::de::Error::custom(
            "segment bounds need two elements",
        )),
    }
}

fn bounds_to_array<S>(bounds: &SegmentBounds, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    [bounds.start, bounds.end].serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_segment_from_api_json() {
        let segment: Segment = serde_json::from_value(json!({
            "UUID": "8a7c2d3e",
            "category": "sponsor",
            "actionType": "skip",
            "segment": [13.5, 42.0]
        }))
        .unwrap();

        assert_eq!(segment.uuid, "8a7c2d3e");
        assert_eq!(segment.category, Category::Sponsor);
        assert_eq!(segment.action, Action::Skip);
        assert_eq!(segment.start(), 13.5);
        assert_eq!(segment.end(), 42.0);
        assert_eq!(segment.duration(), 28.5);
    }

    #[test]
    fn test_unknown_category_is_tolerated() {
        let segment: Segment = serde_json::from_value(json!({
            "UUID": "x",
            "category": "some_future_category",
            "actionType": "skip",
            "segment": [0.0, 1.0]
        }))
        .unwrap();

        assert_eq!(segment.category, Category::Unknown);
    }

    #[test]
    fn test_contains_is_half_open() {
        let segment: Segment = serde_json::from_value(json!({
            "UUID": "x",
            "category": "intro",
            "actionType": "skip",
            "segment": [10.0, 20.0]
        }))
        .unwrap();

        assert!(segment.contains(10.0));
        assert!(segment.contains(19.9));
        assert!(!segment.contains(20.0));
        assert!(!segment.contains(9.9));
    }

    #[test]
    fn test_music_offtopic_wire_name() {
        assert_eq!(Category::MusicOfftopic.as_str(), "music_offtopic");
        let parsed: Category = serde_json::from_value(json!("music_offtopic")).unwrap();
        assert_eq!(parsed, Category::MusicOfftopic);
    }

    #[test]
    fn test_highlight_segment_is_preserved() {
        let segment: Segment = serde_json::from_value(json!({
            "UUID": "x",
            "category": "poi_highlight",
            "actionType": "poi",
            "segment": [95.0, 95.0]
        }))
        .unwrap();

        assert_eq!(segment.category, Category::PoiHighlight);
        assert_eq!(segment.action, Action::Poi);
        assert_eq!(Category::PoiHighlight.as_str(), "poi_highlight");
    }
}
