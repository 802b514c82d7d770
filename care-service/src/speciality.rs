//! Free-form speciality names (as an analysis or a user phrases them) to catalog specialities.

pub const FALLBACK_SPECIALITY: &str = "General Medicine";

/// Alias to catalog speciality. Order matters for substring matching: the first alias contained
/// in the input wins.
pub const SPECIALITY_ALIASES: &[(&str, &str)] = &[
    // General medicine
    ("general physician", "General Medicine"),
    ("general doctor", "General Medicine"),
    ("general practice", "General Medicine"),
    ("family doctor", "General Medicine"),
    ("family medicine", "General Medicine"),
    ("internal medicine", "General Medicine"),
    ("gp", "General Medicine"),
    ("primary care", "General Medicine"),
    ("general checkup", "General Medicine"),
    ("fever", "General Medicine"),
    ("cold", "General Medicine"),
    ("cough", "General Medicine"),
    ("viral", "General Medicine"),
    ("flu", "General Medicine"),
    ("infection", "General Medicine"),
    ("weakness", "General Medicine"),
    ("body pain", "General Medicine"),
    // ENT
    ("ent", "ENT"),
    ("ear specialist", "ENT"),
    ("nose specialist", "ENT"),
    ("throat specialist", "ENT"),
    ("ear nose throat", "ENT"),
    ("sinus", "ENT"),
    ("tonsils", "ENT"),
    ("ear pain", "ENT"),
    ("hearing problem", "ENT"),
    // Eye
    ("eye specialist", "Ophthalmology"),
    ("eye doctor", "Ophthalmology"),
    ("vision problem", "Ophthalmology"),
    ("blur vision", "Ophthalmology"),
    ("eye pain", "Ophthalmology"),
    ("optometrist", "Ophthalmology"),
    ("ophthalmologist", "Ophthalmology"),
    // Heart
    ("heart specialist", "Cardiology"),
    ("cardiologist", "Cardiology"),
    ("heart problem", "Cardiology"),
    ("chest pain", "Cardiology"),
    ("heart pain", "Cardiology"),
    ("bp problem", "Cardiology"),
    ("high bp", "Cardiology"),
    ("low bp", "Cardiology"),
    ("cardiac", "Cardiology"),
    ("heart attack", "Cardiology"),
    // Brain and nerves
    ("brain specialist", "Neurology"),
    ("neurologist", "Neurology"),
    ("headache", "Neurology"),
    ("migraine", "Neurology"),
    ("seizures", "Neurology"),
    ("epilepsy", "Neurology"),
    ("nerve problem", "Neurology"),
    ("paralysis", "Neurology"),
    ("stroke", "Neurology"),
    // Bone
    ("bone specialist", "Orthopedics"),
    ("orthopedic", "Orthopedics"),
    ("joint pain", "Orthopedics"),
    ("knee pain", "Orthopedics"),
    ("back pain", "Orthopedics"),
    ("shoulder pain", "Orthopedics"),
    ("fracture", "Orthopedics"),
    ("slip disc", "Orthopedics"),
    ("arthritis", "Orthopedics"),
    // Skin
    ("skin specialist", "Dermatology"),
    ("dermatologist", "Dermatology"),
    ("skin allergy", "Dermatology"),
    ("rashes", "Dermatology"),
    ("itching", "Dermatology"),
    ("acne", "Dermatology"),
    ("pimples", "Dermatology"),
    ("hair fall", "Dermatology"),
    // Child
    ("child specialist", "Pediatrics"),
    ("pediatrician", "Pediatrics"),
    ("baby doctor", "Pediatrics"),
    ("newborn", "Pediatrics"),
    ("child fever", "Pediatrics"),
    ("vaccination", "Pediatrics"),
    // Women
    ("gynecologist", "Gynecology"),
    ("pregnancy", "Gynecology"),
    ("period problem", "Gynecology"),
    ("pcos", "Gynecology"),
    ("women health", "Gynecology"),
    ("delivery", "Gynecology"),
    ("pregnant", "Gynecology"),
    // Stomach
    ("stomach pain", "Gastroenterology"),
    ("acidity", "Gastroenterology"),
    ("gas", "Gastroenterology"),
    ("indigestion", "Gastroenterology"),
    ("constipation", "Gastroenterology"),
    ("diarrhea", "Gastroenterology"),
    ("vomiting", "Gastroenterology"),
    ("liver", "Gastroenterology"),
    // Kidney and urine
    ("kidney", "Nephrology"),
    ("urine problem", "Urology"),
    ("urinary infection", "Urology"),
    ("uti", "Urology"),
    ("bladder", "Urology"),
    // Lungs
    ("lung", "Pulmonology"),
    ("breathing problem", "Pulmonology"),
    ("asthma", "Pulmonology"),
    ("shortness of breath", "Pulmonology"),
    ("coughing blood", "Pulmonology"),
    // Mental health
    ("depression", "Psychiatry"),
    ("anxiety", "Psychiatry"),
    ("panic attack", "Psychiatry"),
    ("stress", "Psychiatry"),
    ("sleep problem", "Psychiatry"),
    ("insomnia", "Psychiatry"),
    // Emergency
    ("emergency", "Emergency Care"),
    ("accident", "Emergency Care"),
    ("injury", "Emergency Care"),
    ("bleeding", "Emergency Care"),
    ("unconscious", "Emergency Care"),
    ("burn", "Emergency Care"),
    // Hormones
    ("diabetes", "Endocrinology"),
    ("thyroid", "Endocrinology"),
    ("hormone", "Endocrinology"),
    ("sugar problem", "Endocrinology"),
];

/// Canonical name, then exact alias, then first alias contained in the input, then
/// [`FALLBACK_SPECIALITY`].
pub fn normalize_speciality(speciality: &str) -> &'static str {
    let wanted = speciality.trim().to_lowercase();
    if wanted.is_empty() {
        return FALLBACK_SPECIALITY;
    }

    SPECIALITY_ALIASES
        .iter()
        .find(|(_, canonical)| canonical.to_lowercase() == wanted)
        .or_else(|| SPECIALITY_ALIASES.iter().find(|(alias, _)| *alias == wanted))
        .or_else(|| {
            SPECIALITY_ALIASES
                .iter()
                .find(|(alias, _)| wanted.contains(alias))
        })
        .map(|(_, speciality)| *speciality)
        .unwrap_or(FALLBACK_SPECIALITY)
}
