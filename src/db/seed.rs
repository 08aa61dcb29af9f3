//! Bundled reference data.
//!
//! A fresh database is seeded with a starter catalog: a medication formulary
//! spanning all provider scopes, a set of Clark County (Nevada) treatment
//! protocols, an NREMT-style question pool, chapter study notes, pharmacology
//! flashcards, and the interactive learning modules. Seeding runs once on
//! first launch (`seed_if_empty`) and on demand through `reseed`, which
//! restores the bundled rows without touching user uploads.

use rusqlite::Connection;
use serde::Serialize;
use serde_json::json;

use crate::db::DatabaseError;
use crate::flashcards::{insert_flashcard, FlashcardInput};
use crate::learning::{insert_learning_module, LearningModuleInput};
use crate::medications::{count_medications, insert_medication, MedicationInput};
use crate::models::{AgeGroup, ProviderScope, QuestionKind};
use crate::protocols::{insert_protocol, ProtocolInput};
use crate::questions::{insert_question, QuestionInput};
use crate::study_notes::{insert_study_note, StudyNoteInput};

const BOOK_TITLE: &str = "Emergency Care and Transportation of the Sick and Injured 12th Edition";

/// Row counts written by a seeding pass.
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub medications: usize,
    pub protocols: usize,
    pub questions: usize,
    pub study_notes: usize,
    pub flashcards: usize,
    pub learning_modules: usize,
}

// ═══════════════════════════════════════════
// Entry points
// ═══════════════════════════════════════════

/// Seed the starter catalog on first launch.
///
/// The medication formulary doubles as the sentinel: an empty `medications`
/// table means the database has never been seeded. Returns `None` when the
/// data is already present.
pub fn seed_if_empty(conn: &Connection) -> Result<Option<SeedReport>, DatabaseError> {
    if count_medications(conn)? > 0 {
        tracing::debug!("reference data already present, skipping seed");
        return Ok(None);
    }
    run_seed(conn).map(Some)
}

/// Clear the bundled rows and write the catalog again.
///
/// User-created rows in the reference tables are replaced wholesale; uploaded
/// protocols are kept because only bundled protocols carry the
/// `/protocols/clark-county/` file path prefix.
pub fn reseed(conn: &Connection) -> Result<SeedReport, DatabaseError> {
    clear_seeded(conn)?;
    run_seed(conn)
}

fn clear_seeded(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM medications", [])?;
    conn.execute("DELETE FROM nremt_questions", [])?;
    conn.execute("DELETE FROM learning_modules", [])?;
    conn.execute("DELETE FROM study_notes", [])?;
    conn.execute("DELETE FROM flashcards", [])?;
    conn.execute(
        "DELETE FROM protocols WHERE file_path LIKE '/protocols/clark-county/%'",
        [],
    )?;
    Ok(())
}

fn run_seed(conn: &Connection) -> Result<SeedReport, DatabaseError> {
    let medications = seed_table(conn, medication_rows(), insert_medication)?;
    let protocols = seed_table(conn, protocol_rows(), insert_protocol)?;
    let questions = seed_table(conn, question_rows(), insert_question)?;
    let study_notes = seed_table(conn, study_note_rows(), insert_study_note)?;
    let flashcards = seed_table(conn, flashcard_rows(), insert_flashcard)?;
    let learning_modules = seed_table(conn, learning_module_rows(), insert_learning_module)?;

    tracing::info!(
        medications,
        protocols,
        questions,
        study_notes,
        flashcards,
        learning_modules,
        "seeded reference data"
    );

    Ok(SeedReport {
        medications,
        protocols,
        questions,
        study_notes,
        flashcards,
        learning_modules,
    })
}

fn seed_table<I, T>(
    conn: &Connection,
    rows: Vec<I>,
    insert: impl Fn(&Connection, &I) -> Result<T, DatabaseError>,
) -> Result<usize, DatabaseError> {
    for row in &rows {
        insert(conn, row)?;
    }
    Ok(rows.len())
}

// ═══════════════════════════════════════════
// Medication formulary
// ═══════════════════════════════════════════

fn medication_rows() -> Vec<MedicationInput> {
    use ProviderScope::{Aemt, Emt, Paramedic};

    vec![
        med(
            "Oxygen",
            Emt,
            "Gas",
            &["Hypoxia", "Respiratory distress", "Shock", "Suspected CO poisoning"],
            &["None in the emergency setting"],
            "Titrate to SpO2 94-99%; 15 L/min via non-rebreather for severe distress",
            "Same titration targets; blow-by for infants who will not tolerate a mask",
            "Inhalation",
            "Immediate",
            "While administered",
            Some("Document the delivery device and flow rate with each set of vitals"),
        ),
        med(
            "Aspirin",
            Emt,
            "Antiplatelet",
            &["Chest pain of suspected cardiac origin"],
            &["Allergy", "Active GI bleeding", "Pediatric patient"],
            "324 mg (four 81 mg chewable tablets)",
            "Not recommended",
            "PO (chewed)",
            "15-30 minutes",
            "4-6 hours",
            Some("Give even if the patient takes daily aspirin, unless already dosed for this event"),
        ),
        med(
            "Epinephrine (1:1,000)",
            Emt,
            "Sympathomimetic",
            &["Anaphylaxis", "Severe allergic reaction"],
            &["None in anaphylaxis"],
            "0.3 mg IM",
            "0.15 mg IM (under 30 kg)",
            "IM (lateral thigh)",
            "1-3 minutes",
            "10-20 minutes",
            Some("Repeat after 5-15 minutes if symptoms persist"),
        ),
        med(
            "Albuterol",
            Emt,
            "Bronchodilator",
            &["Bronchospasm", "Asthma", "COPD exacerbation"],
            &["Tachydysrhythmia", "Hypersensitivity"],
            "2.5 mg in 3 mL normal saline nebulized; may repeat",
            "1.25-2.5 mg nebulized",
            "Nebulized",
            "5-15 minutes",
            "3-4 hours",
            Some("Tremor and tachycardia are expected side effects; monitor heart rate"),
        ),
        med(
            "Oral Glucose",
            Emt,
            "Carbohydrate",
            &["Hypoglycemia with an intact gag reflex"],
            &["Unresponsive patient", "Unable to swallow"],
            "15-24 g buccal",
            "7.5-12 g buccal",
            "Buccal",
            "5-10 minutes",
            "Varies",
            Some("Recheck blood glucose 10-15 minutes after administration"),
        ),
        med(
            "Naloxone",
            Emt,
            "Opioid antagonist",
            &["Suspected opioid overdose with respiratory depression"],
            &["Hypersensitivity"],
            "4 mg IN, or 0.4-2 mg IM; titrate to adequate respirations",
            "0.1 mg/kg IN/IM (max 2 mg)",
            "IN, IM",
            "2-5 minutes",
            "30-90 minutes",
            Some("Wears off before many opioids; be ready to redose"),
        ),
        med(
            "Nitroglycerin",
            Emt,
            "Vasodilator",
            &["Chest pain of suspected cardiac origin with SBP above 100"],
            &[
                "SBP below 100",
                "PDE-5 inhibitor within 48 hours",
                "Suspected right ventricular infarct",
            ],
            "0.4 mg SL every 5 minutes, max 3 doses",
            "Not used",
            "SL",
            "1-3 minutes",
            "20-30 minutes",
            Some("EMTs assist with the patient's own prescription per local protocol"),
        ),
        med(
            "Glucagon",
            Aemt,
            "Hormone",
            &["Hypoglycemia without IV access"],
            &["Pheochromocytoma", "Insulinoma"],
            "1 mg IM",
            "0.5 mg IM (under 20 kg)",
            "IM",
            "8-15 minutes",
            "60-90 minutes",
            Some("Depends on liver glycogen stores; may fail in malnourished patients"),
        ),
        med(
            "Dextrose 50%",
            Aemt,
            "Carbohydrate",
            &["Hypoglycemia with confirmed IV access"],
            &["No documented hypoglycemia in suspected intracranial hemorrhage"],
            "25 g slow IV",
            "Use D25 or D10 per protocol",
            "IV",
            "Under 1 minute",
            "Varies",
            Some("Verify line patency; extravasation causes tissue necrosis"),
        ),
        med(
            "Ondansetron",
            Aemt,
            "Antiemetic",
            &["Nausea", "Vomiting"],
            &["Known QT prolongation", "Hypersensitivity"],
            "4 mg IV, IM, or ODT",
            "0.1 mg/kg (max 4 mg)",
            "IV, IM, ODT",
            "15-30 minutes",
            "4-8 hours",
            None,
        ),
        med(
            "Ipratropium Bromide",
            Aemt,
            "Anticholinergic bronchodilator",
            &["Bronchospasm refractory to albuterol alone"],
            &["Soy or peanut allergy (MDI formulation)"],
            "0.5 mg nebulized with albuterol",
            "0.25-0.5 mg nebulized",
            "Nebulized",
            "5-15 minutes",
            "4-6 hours",
            Some("Typically a single dose mixed with the first albuterol treatment"),
        ),
        med(
            "Fentanyl",
            Paramedic,
            "Opioid analgesic",
            &["Moderate to severe pain"],
            &["Respiratory depression", "Hypotension", "Hypersensitivity"],
            "1 mcg/kg IV/IN, max 100 mcg per dose",
            "1 mcg/kg IV/IN",
            "IV, IN, IM",
            "1-3 minutes IV",
            "30-60 minutes",
            Some("Less histamine release and hypotension than morphine"),
        ),
        med(
            "Midazolam (Versed)",
            Paramedic,
            "Benzodiazepine",
            &["Active seizure", "Severe agitation", "Procedural sedation"],
            &["Hypotension", "Respiratory depression without airway control"],
            "2-5 mg IV, IM, or IN",
            "0.1 mg/kg IV (max 2 mg per dose)",
            "IV, IM, IN",
            "1-5 minutes",
            "30-60 minutes",
            Some("Continuous SpO2 and capnography after administration"),
        ),
        med(
            "Adenosine",
            Paramedic,
            "Antidysrhythmic",
            &["Stable narrow-complex SVT"],
            &["Second- or third-degree heart block", "Sick sinus syndrome"],
            "6 mg rapid IV push; 12 mg if no conversion",
            "0.1 mg/kg rapid IV (max 6 mg first dose)",
            "IV",
            "Seconds",
            "Under 10 seconds",
            Some("Follow immediately with a 10-20 mL saline flush; brief asystole is expected"),
        ),
        med(
            "Amiodarone",
            Paramedic,
            "Antidysrhythmic",
            &["VF or pulseless VT refractory to defibrillation", "Stable VT"],
            &["Cardiogenic shock", "Severe bradycardia", "Iodine hypersensitivity"],
            "300 mg IV push in arrest; repeat 150 mg once",
            "5 mg/kg IV/IO in arrest",
            "IV, IO",
            "Minutes",
            "Hours",
            None,
        ),
        med(
            "Atropine",
            Paramedic,
            "Anticholinergic",
            &["Symptomatic bradycardia", "Organophosphate poisoning"],
            &["None in unstable bradycardia"],
            "1 mg IV every 3-5 minutes, max 3 mg",
            "0.02 mg/kg IV (min 0.1 mg)",
            "IV, IO",
            "1-2 minutes",
            "2-4 hours",
            Some("Doses below 0.1 mg can cause paradoxical bradycardia"),
        ),
        med(
            "Epinephrine (1:10,000)",
            Paramedic,
            "Sympathomimetic",
            &["Cardiac arrest"],
            &["None in cardiac arrest"],
            "1 mg IV/IO every 3-5 minutes",
            "0.01 mg/kg IV/IO (max 1 mg)",
            "IV, IO",
            "Under 1 minute",
            "5-10 minutes",
            Some("Verify the concentration before pushing; 1:1,000 is for IM use only"),
        ),
        med(
            "Ketamine",
            Paramedic,
            "Dissociative anesthetic",
            &["Severe pain", "Agitated delirium", "Induction for airway management"],
            &["Known hypersensitivity"],
            "Pain: 0.1-0.3 mg/kg slow IV; dissociation: 1-2 mg/kg IV",
            "Per protocol with medical direction",
            "IV, IM, IN",
            "30-60 seconds IV",
            "10-20 minutes",
            Some("Manage emergence reactions with a calm environment; benzodiazepines if severe"),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn med(
    name: &str,
    scope: ProviderScope,
    category: &str,
    indications: &[&str],
    contraindications: &[&str],
    adult_dose: &str,
    pediatric_dose: &str,
    route: &str,
    onset: &str,
    duration: &str,
    notes: Option<&str>,
) -> MedicationInput {
    MedicationInput {
        name: name.into(),
        scope: scope.as_str().into(),
        category: category.into(),
        indications: strings(indications),
        contraindications: strings(contraindications),
        adult_dose: adult_dose.into(),
        pediatric_dose: Some(pediatric_dose.into()),
        route: route.into(),
        onset: Some(onset.into()),
        duration: Some(duration.into()),
        notes: notes.map(Into::into),
    }
}

// ═══════════════════════════════════════════
// Treatment protocols (Clark County, Nevada)
// ═══════════════════════════════════════════

fn protocol_rows() -> Vec<ProtocolInput> {
    use ProviderScope::{Aemt, Emt, Paramedic};

    vec![
        protocol(
            "General Adult Assessment",
            "Adult Treatment",
            Emt,
            AgeGroup::Adult,
            "Systematic assessment sequence for all adult patients",
            "# General Adult Assessment\n\n## Primary Assessment\n- Scene safety and general impression\n- Level of consciousness (AVPU)\n- Airway: patency, positioning, suction as needed\n- Breathing: rate, depth, effort; oxygen titrated to SpO2 94-99%\n- Circulation: pulse, skin signs, hemorrhage control\n\n## Secondary Assessment\n- Full vital signs including blood glucose when indicated\n- SAMPLE history and OPQRST for the chief complaint\n- Focused physical exam\n\n## Reassessment\n- Stable patients every 15 minutes\n- Unstable patients every 5 minutes",
            "adult-assessment",
        ),
        protocol(
            "General Adult Trauma Assessment",
            "Adult Treatment",
            Emt,
            AgeGroup::Adult,
            "Trauma-specific assessment with hemorrhage-first sequencing",
            "# General Adult Trauma Assessment\n\n## Sequence (XABCDE)\n1. Control massive external hemorrhage first: direct pressure, then tourniquet\n2. Airway with cervical spine precautions (jaw thrust)\n3. Breathing: expose the chest, seal open wounds, support ventilation\n4. Circulation: perfusion status, shock management\n5. Disability: GCS, pupils, lateralizing signs\n6. Expose and examine, then prevent hypothermia\n\n## Transport\n- Limit scene time to 10 minutes for major trauma\n- Apply the field triage criteria for destination selection",
            "adult-trauma-assessment",
        ),
        protocol(
            "Cardiac Arrest (Non-Traumatic)",
            "Adult Treatment",
            Paramedic,
            AgeGroup::Adult,
            "Adult non-traumatic cardiac arrest management",
            "# Cardiac Arrest (Non-Traumatic)\n\n## BLS Priorities\n- Compressions 100-120/min, 2-2.4 inches, full recoil\n- Minimize interruptions; rotate compressors every 2 minutes\n- Defibrillate VF/pVT as soon as the monitor is available\n\n## ALS Priorities\n- Epinephrine 1 mg IV/IO every 3-5 minutes\n- Amiodarone 300 mg IV/IO for refractory VF/pVT, repeat 150 mg once\n- Advanced airway without interrupting compressions; continuous EtCO2\n\n## Reversible Causes\n- Consider the Hs and Ts on every cycle",
            "cardiac-arrest",
        ),
        protocol(
            "Chest Pain (Non-Traumatic) and Suspected ACS",
            "Adult Treatment",
            Aemt,
            AgeGroup::Adult,
            "Chest pain evaluation and acute coronary syndrome care",
            "# Chest Pain (Non-Traumatic) and Suspected ACS\n\n## All Providers\n- Oxygen only if SpO2 below 94%\n- Aspirin 324 mg chewed unless contraindicated\n- Assist with prescribed nitroglycerin if SBP above 100\n\n## AEMT / Paramedic\n- 12-lead ECG within 10 minutes of contact; transmit for STEMI alert\n- IV access; nitroglycerin 0.4 mg SL every 5 minutes while SBP above 100\n- Withhold nitroglycerin after PDE-5 inhibitor use within 48 hours\n\n## Transport\n- STEMI patients go directly to a PCI-capable facility",
            "chest-pain-acs",
        ),
        protocol(
            "General Pediatric Assessment",
            "Pediatric Treatment",
            Emt,
            AgeGroup::Pediatric,
            "Assessment of infants and children using the pediatric assessment triangle",
            "# General Pediatric Assessment\n\n## Pediatric Assessment Triangle\n- Appearance: tone, interactiveness, consolability, look or gaze, speech or cry\n- Work of breathing: abnormal sounds, positioning, retractions, flaring\n- Circulation to skin: pallor, mottling, cyanosis\n\n## Primary Assessment\n- Weight estimation with a length-based tape\n- Age-appropriate vital sign ranges\n- Keep the child with a caregiver when condition allows\n\n## Red Flags\n- Grunting, bradycardia, and hypotension are late and ominous findings",
            "pediatric-assessment",
        ),
        protocol(
            "Trauma Field Triage Criteria",
            "Operations",
            Emt,
            AgeGroup::AdultPediatric,
            "Destination decision criteria for injured patients",
            "# Trauma Field Triage Criteria\n\n## Physiologic (transport to highest-level trauma center)\n- GCS 13 or less, SBP below 90, RR below 10 or above 29\n\n## Anatomic\n- Penetrating injury to head, neck, torso, or proximal extremities\n- Flail chest, two or more proximal long-bone fractures\n- Crushed, degloved, mangled, or pulseless extremity\n- Pelvic fracture, open or depressed skull fracture, paralysis\n\n## Mechanism\n- Falls over 20 feet (adults) or 10 feet (children)\n- High-risk vehicle crash: intrusion, ejection, death in the same compartment\n\n## Judgment\n- When in doubt, transport to a trauma center",
            "trauma-field-triage",
        ),
    ]
}

fn protocol(
    name: &str,
    category: &str,
    scope: ProviderScope,
    age_group: AgeGroup,
    description: &str,
    content: &str,
    stem: &str,
) -> ProtocolInput {
    ProtocolInput {
        name: name.into(),
        category: category.into(),
        state: Some("Nevada".into()),
        age_group: age_group.as_str().into(),
        content: content.into(),
        description: Some(description.into()),
        scope: Some(scope.as_str().into()),
        file_path: Some(format!("/protocols/clark-county/{stem}.pdf")),
        file_type: Some("pdf".into()),
        ..ProtocolInput::empty()
    }
}

// ═══════════════════════════════════════════
// NREMT question pool
// ═══════════════════════════════════════════

fn question_rows() -> Vec<QuestionInput> {
    use ProviderScope::{Aemt, Emr, Emt, Paramedic};
    use QuestionKind::{BuildList, ClinicalJudgment, MultipleChoice, MultipleResponse};

    vec![
        question(
            Emr,
            "Cardiology & Resuscitation",
            MultipleChoice,
            "easy",
            None,
            "You find an adult unresponsive with no normal breathing and no pulse. \
             What is your first action?",
            &[
                "Begin chest compressions",
                "Open the airway with a head tilt-chin lift",
                "Attach the AED immediately",
                "Give two rescue breaths",
            ],
            "Begin chest compressions",
            "Resuscitation follows the C-A-B sequence: compressions restore circulation \
             soonest, and the AED is applied as soon as it arrives without delaying CPR.",
            Some("Cardiac Arrest (Non-Traumatic)"),
            None,
            &["cpr", "cardiac-arrest"],
        ),
        question(
            Emr,
            "Airway, Respiration & Ventilation",
            MultipleChoice,
            "easy",
            None,
            "What is the correct ventilation rate for an apneic adult who has a pulse?",
            &[
                "One breath every 6 seconds",
                "One breath every 3 seconds",
                "Two breaths every 10 seconds",
                "One breath every 10 seconds",
            ],
            "One breath every 6 seconds",
            "Rescue breathing for an adult with a pulse is one breath every 6 seconds \
             (10 per minute), each delivered over one second with visible chest rise.",
            None,
            Some("minute_ventilation"),
            &["ventilation", "bvm"],
        ),
        question(
            Emr,
            "Trauma",
            MultipleChoice,
            "medium",
            None,
            "Direct pressure has not controlled severe bleeding from a leg wound. \
             What is the next step?",
            &[
                "Apply a tourniquet proximal to the wound",
                "Elevate the extremity and wait",
                "Apply pressure to a proximal pressure point and reassess",
                "Pack the wound with ice",
            ],
            "Apply a tourniquet proximal to the wound",
            "When direct pressure fails for life-threatening extremity hemorrhage, apply \
             a tourniquet proximal to the wound, tighten until bleeding stops, and record \
             the application time.",
            Some("General Adult Trauma Assessment"),
            None,
            &["hemorrhage", "tourniquet"],
        ),
        question(
            Emt,
            "Cardiology & Resuscitation",
            MultipleResponse,
            "medium",
            Some(
                "A 58-year-old man reports crushing substernal chest pain radiating to \
                 his left arm. He is pale and diaphoretic. Vital signs: BP 142/88, pulse \
                 96, respirations 20, SpO2 93% on room air.",
            ),
            "Which interventions are appropriate at the EMT level? Select all that apply.",
            &[
                "Administer supplemental oxygen",
                "Assist with aspirin 325 mg PO",
                "Apply high-flow oxygen regardless of SpO2",
                "Delay transport to await an ALS intercept",
            ],
            "Administer supplemental oxygen,Assist with aspirin 325 mg PO",
            "SpO2 below 94% warrants supplemental oxygen, and aspirin is indicated for \
             suspected ACS. High-flow oxygen is not indicated at this saturation, and \
             transport is never delayed for an intercept.",
            Some("Chest Pain (Non-Traumatic) and Suspected ACS"),
            Some("oxygen_duration"),
            &["cardiac", "chest-pain"],
        ),
        question(
            Emt,
            "Medical, Obstetrics & Gynecology",
            MultipleChoice,
            "easy",
            None,
            "Which findings make up the Cincinnati Prehospital Stroke Scale?",
            &[
                "Facial droop, arm drift, abnormal speech",
                "Pupil size, grip strength, gait",
                "Blood pressure, pulse, respirations",
                "Facial droop, leg weakness, memory",
            ],
            "Facial droop, arm drift, abnormal speech",
            "The scale screens exactly three findings: facial droop, arm drift, and \
             abnormal speech. Any single abnormal finding indicates a possible stroke \
             and warrants rapid transport with a documented last-known-well time.",
            None,
            None,
            &["stroke", "neuro"],
        ),
        question(
            Emt,
            "Trauma",
            BuildList,
            "medium",
            None,
            "Place the steps of the primary assessment for an unresponsive trauma \
             patient in the correct order.",
            &[
                "Control massive hemorrhage",
                "Open the airway with a jaw thrust",
                "Assess breathing",
                "Assess circulation",
                "Expose and examine",
            ],
            "Control massive hemorrhage,Open the airway with a jaw thrust,Assess breathing,\
             Assess circulation,Expose and examine",
            "Massive external hemorrhage is addressed before the airway in the trauma \
             sequence (XABCDE), and the jaw thrust protects the cervical spine in place \
             of a head tilt.",
            Some("General Adult Trauma Assessment"),
            Some("glasgow_coma"),
            &["trauma", "assessment"],
        ),
        question(
            Aemt,
            "Medical, Obstetrics & Gynecology",
            ClinicalJudgment,
            "hard",
            Some(
                "Police direct you to a 24-year-old woman found unresponsive with drug \
                 paraphernalia nearby. Respirations are 6 per minute and shallow, pupils \
                 are pinpoint, and SpO2 is 84% on room air.",
            ),
            "After opening the airway and beginning bag-valve-mask ventilation, which \
             intervention is the priority?",
            &[
                "Administer naloxone",
                "Perform endotracheal intubation immediately",
                "Administer dextrose 50%",
                "Apply a non-rebreather mask",
            ],
            "Administer naloxone",
            "Ventilation comes first, then naloxone to reverse the opioid toxidrome of \
             respiratory depression with miosis. Titrate to adequate respirations rather \
             than full arousal to avoid precipitated withdrawal.",
            None,
            None,
            &["overdose", "naloxone"],
        ),
        question(
            Aemt,
            "Medical, Obstetrics & Gynecology",
            MultipleChoice,
            "medium",
            None,
            "An adult in compensated hypovolemic shock should initially receive which \
             IV fluid therapy?",
            &[
                "500 mL to 1 L isotonic crystalloid, reassessing after each bolus",
                "A continuous wide-open infusion until arrival",
                "250 mL of D5W",
                "No fluids until the blood pressure falls",
            ],
            "500 mL to 1 L isotonic crystalloid, reassessing after each bolus",
            "Isotonic crystalloid in boluses with reassessment between them is the \
             standard approach to hypovolemia. D5W is never a resuscitation fluid, and \
             waiting for decompensation forfeits the window to act.",
            None,
            Some("iv_drip"),
            &["shock", "fluids"],
        ),
        question(
            Aemt,
            "Medical, Obstetrics & Gynecology",
            MultipleChoice,
            "medium",
            None,
            "A diabetic adult is unresponsive with a blood glucose of 32 mg/dL and a \
             patent IV. Which treatment is indicated?",
            &[
                "Dextrose 50%, 25 g slow IV",
                "Oral glucose between the cheek and gum",
                "Glucagon 1 mg IM",
                "Insulin 10 units IV",
            ],
            "Dextrose 50%, 25 g slow IV",
            "With IV access, concentrated dextrose corrects hypoglycemia fastest. Oral \
             glucose is contraindicated in unresponsive patients, and glucagon is the \
             fallback when no line can be established.",
            None,
            None,
            &["diabetic", "hypoglycemia"],
        ),
        question(
            Paramedic,
            "Cardiology & Resuscitation",
            ClinicalJudgment,
            "hard",
            Some(
                "You arrive to find firefighters performing high-quality CPR on a \
                 62-year-old man. The monitor shows ventricular fibrillation, and your \
                 partner has the defibrillator charged to 200 joules biphasic.",
            ),
            "What is your next action?",
            &[
                "Clear the patient and deliver the shock",
                "Administer epinephrine 1 mg IV first",
                "Place an advanced airway before defibrillating",
                "Perform a pulse check to confirm the rhythm",
            ],
            "Clear the patient and deliver the shock",
            "Defibrillation is the definitive treatment for VF and takes priority over \
             drugs and advanced airway placement. Minimize the pre-shock pause, deliver \
             the shock, and resume compressions immediately.",
            Some("Cardiac Arrest (Non-Traumatic)"),
            None,
            &["cardiac-arrest", "defibrillation"],
        ),
        question(
            Paramedic,
            "Medical, Obstetrics & Gynecology",
            MultipleResponse,
            "hard",
            Some("You administer midazolam 5 mg IM to an adult in status epilepticus."),
            "Which parameters must be monitored closely after administration? \
             Select all that apply.",
            &[
                "Respiratory rate and depth",
                "End-tidal CO2",
                "Blood pressure",
                "Deep tendon reflexes",
            ],
            "Respiratory rate and depth,End-tidal CO2,Blood pressure",
            "Benzodiazepines cause dose-dependent respiratory depression and hypotension, \
             and capnography detects hypoventilation before the SpO2 falls. Reflexes are \
             not a monitoring priority.",
            None,
            None,
            &["seizure", "sedation"],
        ),
        question(
            Paramedic,
            "Cardiology & Resuscitation",
            MultipleChoice,
            "hard",
            None,
            "A stable adult with a narrow-complex tachycardia at 180 has not responded \
             to vagal maneuvers. What is the next intervention?",
            &[
                "Adenosine 6 mg rapid IV push",
                "Synchronized cardioversion at 100 joules",
                "Amiodarone 150 mg over 10 minutes",
                "Diltiazem 0.25 mg/kg slow IV",
            ],
            "Adenosine 6 mg rapid IV push",
            "For stable SVT refractory to vagal maneuvers, adenosine 6 mg by rapid push \
             with an immediate flush is first-line. Cardioversion is reserved for \
             unstable patients.",
            None,
            None,
            &["svt", "dysrhythmia"],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn question(
    scope: ProviderScope,
    content_area: &str,
    kind: QuestionKind,
    difficulty: &str,
    scenario: Option<&str>,
    question_text: &str,
    options: &[&str],
    correct_answer: &str,
    explanation: &str,
    protocol_reference: Option<&str>,
    calculator_link: Option<&str>,
    tags: &[&str],
) -> QuestionInput {
    QuestionInput {
        scope: scope.as_str().into(),
        content_area: content_area.into(),
        question_type: kind.as_str().into(),
        question_text: question_text.into(),
        scenario: scenario.map(Into::into),
        options: strings(options),
        correct_answer: correct_answer.into(),
        explanation: explanation.into(),
        protocol_reference: protocol_reference.map(Into::into),
        calculator_link: calculator_link.map(Into::into),
        difficulty: difficulty.into(),
        tags: strings(tags),
    }
}

// ═══════════════════════════════════════════
// Study notes
// ═══════════════════════════════════════════

fn study_note_rows() -> Vec<StudyNoteInput> {
    vec![
        note(
            10,
            "Patient Assessment",
            "The assessment sequence is the backbone of every call: size up the scene, \
             find and treat life threats in the primary assessment, then build the \
             history and physical exam around the chief complaint.",
            &[
                "Scene size-up precedes all patient contact",
                "The primary assessment finds and treats life threats in order",
                "A complete set of vital signs anchors every reassessment",
                "Reassess stable patients every 15 minutes, unstable every 5",
            ],
            &[
                "Describe the components of the scene size-up",
                "Sequence the primary assessment for medical and trauma patients",
                "Differentiate stable from unstable reassessment intervals",
            ],
            &["assessment"],
            true,
        ),
        note(
            11,
            "Airway Management",
            "Airway obstruction kills faster than any other reversible problem. Master \
             manual maneuvers and adjuncts before reaching for anything advanced.",
            &[
                "The tongue is the most common obstruction in unresponsive patients",
                "Jaw thrust for suspected spinal injury, head tilt-chin lift otherwise",
                "Oropharyngeal airways require an absent gag reflex",
                "Limit suctioning to 15 seconds in adults",
            ],
            &[
                "Select the correct manual airway maneuver for the mechanism",
                "Size and insert oropharyngeal and nasopharyngeal airways",
                "Demonstrate effective two-person bag-valve-mask technique",
            ],
            &["airway"],
            true,
        ),
        note(
            13,
            "Shock",
            "Shock is inadequate tissue perfusion, not a blood pressure reading. The \
             body compensates until it suddenly cannot, so treat the trend rather than \
             a single set of numbers.",
            &[
                "Compensated shock shows tachycardia and anxiety before hypotension",
                "Falling blood pressure is a late and ominous finding",
                "Control bleeding, keep the patient warm, give oxygen, transport early",
                "Children compensate longer and crash faster than adults",
            ],
            &[
                "Classify shock by cause: hypovolemic, cardiogenic, distributive, obstructive",
                "Recognize compensated versus decompensated shock",
                "Prioritize field interventions for the shocked patient",
            ],
            &["shock", "perfusion"],
            false,
        ),
        note(
            14,
            "BLS Resuscitation",
            "High-quality compressions and early defibrillation decide survival from \
             sudden cardiac arrest; everything else is secondary.",
            &[
                "Adult compressions 100-120 per minute at 2-2.4 inches",
                "Allow full recoil; keep interruptions under 10 seconds",
                "Single-rescuer adult CPR uses a 30:2 ratio",
                "Defibrillate as soon as the AED is available",
            ],
            &[
                "Perform adult, child, and infant CPR to current standards",
                "Operate an AED safely, including pad placement variants",
                "Integrate compressor rotation into team resuscitation",
            ],
            &["cpr", "resuscitation"],
            true,
        ),
        note(
            16,
            "Respiratory Emergencies",
            "Distinguish the wheezing of reactive airways from the crackles of fluid \
             overload before choosing a treatment path, because bronchodilators and \
             CPAP serve different failures.",
            &[
                "Wheezing points to bronchospasm, crackles to pulmonary edema",
                "Tripod positioning and accessory muscle use signal severe distress",
                "A silent chest in an asthmatic is a pre-arrest finding",
                "CPAP splints alveoli open in CHF and COPD when pressures allow",
            ],
            &[
                "Differentiate asthma, COPD, and CHF presentations",
                "Match the oxygen delivery device to the degree of distress",
                "List indications and contraindications for CPAP",
            ],
            &["respiratory"],
            false,
        ),
        note(
            17,
            "Cardiovascular Emergencies",
            "Time is muscle: recognize the atypical presentations, give aspirin early, \
             and move toward definitive care without waiting for the classic picture.",
            &[
                "Women, diabetics, and the elderly present atypically",
                "Aspirin 324 mg chewed unless contraindicated",
                "Nitroglycerin requires SBP above 100 and no recent PDE-5 inhibitor",
                "A normal 12-lead does not rule out an acute coronary syndrome",
            ],
            &[
                "Recognize typical and atypical ACS presentations",
                "Apply the medication assist rules for aspirin and nitroglycerin",
                "Explain why PCI-capable destinations matter for STEMI",
            ],
            &["cardiac"],
            false,
        ),
    ]
}

fn note(
    chapter_number: i32,
    title: &str,
    content: &str,
    key_points: &[&str],
    objectives: &[&str],
    tags: &[&str],
    is_completed: bool,
) -> StudyNoteInput {
    StudyNoteInput {
        chapter_number,
        title: title.into(),
        content: content.into(),
        book_title: BOOK_TITLE.into(),
        tags: strings(tags),
        key_points: strings(key_points),
        objectives: strings(objectives),
        is_completed,
    }
}

// ═══════════════════════════════════════════
// Flashcards
// ═══════════════════════════════════════════

fn flashcard_rows() -> Vec<FlashcardInput> {
    vec![
        card(
            "What is the mechanism of action of albuterol?",
            "Selective beta-2 agonist that relaxes bronchial smooth muscle, producing \
             bronchodilation.",
            "basic",
            "mechanism",
            &["respiratory"],
        ),
        card(
            "What are the field indications for albuterol?",
            "Wheezing or bronchospasm from asthma, COPD, or allergic reaction in a \
             patient with adequate respiratory effort.",
            "basic",
            "indications",
            &["respiratory"],
        ),
        card(
            "What is the adult dose of nebulized albuterol?",
            "2.5 mg in 3 mL of normal saline, repeated per protocol.",
            "basic",
            "dosing",
            &["respiratory"],
        ),
        card(
            "What is the mechanism of action of aspirin in suspected ACS?",
            "Irreversibly inhibits platelet aggregation, limiting clot propagation in \
             the coronary artery.",
            "intermediate",
            "mechanism",
            &["cardiac"],
        ),
        card(
            "What is the adult dose of aspirin for chest pain?",
            "324 mg: four 81 mg chewable tablets, chewed before swallowing.",
            "basic",
            "dosing",
            &["cardiac"],
        ),
        card(
            "What is the mechanism of action of epinephrine in anaphylaxis?",
            "Alpha effects reverse vasodilation and edema; beta-2 effects bronchodilate; \
             beta-1 effects support cardiac output.",
            "intermediate",
            "mechanism",
            &["allergy"],
        ),
        card(
            "What is the adult IM dose of epinephrine 1:1,000?",
            "0.3 mg IM in the lateral thigh, repeated after 5-15 minutes if symptoms \
             persist.",
            "basic",
            "dosing",
            &["allergy"],
        ),
        card(
            "When is oral glucose contraindicated?",
            "When the patient cannot swallow or protect the airway, including any \
             decreased level of consciousness without a gag reflex.",
            "intermediate",
            "indications",
            &["diabetic"],
        ),
    ]
}

fn card(
    question: &str,
    answer: &str,
    difficulty: &str,
    category: &str,
    tags: &[&str],
) -> FlashcardInput {
    FlashcardInput {
        chapter_number: 12,
        question: question.into(),
        answer: answer.into(),
        difficulty: difficulty.into(),
        category: Some(category.into()),
        tags: strings(tags),
    }
}

// ═══════════════════════════════════════════
// Learning modules
// ═══════════════════════════════════════════

fn learning_module_rows() -> Vec<LearningModuleInput> {
    vec![
        module(
            1,
            "Respiratory System Anatomy",
            Some("Interactive walkthrough of the upper and lower airway"),
            json!({
                "module_id": "respiratory-anatomy",
                "kind": "anatomy",
                "path": "airway-mastery",
                "points": 100,
                "regions": ["upper airway", "lower airway", "lungs"],
            }),
            &["anatomy", "airway"],
            Some("Chapter 11"),
        ),
        module(
            2,
            "Cardiovascular System",
            Some("Chambers, valves, and the flow of blood through the heart"),
            json!({
                "module_id": "cardiac-anatomy",
                "kind": "anatomy",
                "path": "cardiac-expert",
                "points": 100,
                "regions": ["right atrium", "right ventricle", "left atrium", "left ventricle"],
            }),
            &["anatomy", "cardiac"],
            Some("Chapter 17"),
        ),
        module(
            3,
            "Musculoskeletal System",
            Some("Bones, joints, and injury patterns relevant to splinting"),
            json!({
                "module_id": "musculoskeletal-anatomy",
                "kind": "anatomy",
                "path": "trauma-specialist",
                "points": 100,
            }),
            &["anatomy", "trauma"],
            None,
        ),
        module(
            4,
            "Asthma Exacerbation Simulation",
            Some("Manage a deteriorating asthmatic from first contact to handoff"),
            json!({
                "module_id": "asthma-simulation",
                "kind": "simulation",
                "path": "airway-mastery",
                "points": 200,
                "stages": ["assessment", "treatment", "reassessment"],
            }),
            &["simulation", "respiratory"],
            None,
        ),
        module(
            5,
            "Adult Cardiac Arrest",
            Some("Team-based arrest scenario with rhythm changes"),
            json!({
                "module_id": "cardiac-arrest-scenario",
                "kind": "scenario",
                "path": "cardiac-expert",
                "points": 200,
                "rhythms": ["vf", "pea", "asystole"],
            }),
            &["scenario", "cardiac"],
            None,
        ),
        module(
            6,
            "Basic Emergency Scenarios",
            None,
            json!({
                "module_id": "basic-scenarios",
                "kind": "scenario",
                "path": "basic-assessment",
                "points": 100,
            }),
            &["scenario", "fundamentals"],
            None,
        ),
    ]
}

fn module(
    module_number: i32,
    title: &str,
    description: Option<&str>,
    content: serde_json::Value,
    tags: &[&str],
    chapter: Option<&str>,
) -> LearningModuleInput {
    LearningModuleInput {
        module_number,
        title: title.into(),
        description: description.map(Into::into),
        content,
        tags: strings(tags),
        chapter: chapter.map(Into::into),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::medications::{fetch_medications, MedicationFilter};
    use crate::protocols::{fetch_protocol, fetch_protocols, ProtocolFilter};
    use crate::questions::{fetch_questions, QuestionFilter};

    fn test_db() -> Connection {
        open_memory_database().unwrap()
    }

    #[test]
    fn seed_if_empty_populates_fresh_database() {
        let conn = test_db();
        let report = seed_if_empty(&conn)
            .unwrap()
            .expect("fresh database should seed");

        assert_eq!(report.medications, medication_rows().len());
        assert_eq!(report.protocols, protocol_rows().len());
        assert_eq!(report.questions, question_rows().len());

        let meds = fetch_medications(&conn, &MedicationFilter::default()).unwrap();
        assert_eq!(meds.len(), report.medications);
    }

    #[test]
    fn second_seed_is_a_noop() {
        let conn = test_db();
        seed_if_empty(&conn).unwrap();
        assert!(seed_if_empty(&conn).unwrap().is_none());

        let meds = fetch_medications(&conn, &MedicationFilter::default()).unwrap();
        assert_eq!(meds.len(), medication_rows().len());
    }

    #[test]
    fn reseed_replaces_catalog_but_keeps_uploads() {
        let conn = test_db();
        seed_if_empty(&conn).unwrap();

        let upload = insert_protocol(
            &conn,
            &ProtocolInput {
                name: "My Agency SOP".into(),
                category: "Operations".into(),
                file_path: Some("/uploads/abc123-sop.pdf".into()),
                ..ProtocolInput::empty()
            },
        )
        .unwrap();
        insert_medication(
            &conn,
            &med(
                "Tranexamic Acid",
                ProviderScope::Paramedic,
                "Antifibrinolytic",
                &["Hemorrhagic shock from trauma"],
                &["More than 3 hours since injury"],
                "1 g IV over 10 minutes",
                "Per medical direction",
                "IV",
                "Minutes",
                "About 3 hours",
                None,
            ),
        )
        .unwrap();

        let report = reseed(&conn).unwrap();
        assert_eq!(report.medications, medication_rows().len());

        // user-entered reference rows are replaced by the catalog
        let meds = fetch_medications(&conn, &MedicationFilter::default()).unwrap();
        assert!(meds.iter().all(|m| m.name != "Tranexamic Acid"));

        // uploaded protocols survive because their path is outside the bundle prefix
        let kept = fetch_protocol(&conn, upload.id).unwrap();
        assert_eq!(kept.name, "My Agency SOP");
        let all = fetch_protocols(&conn, &ProtocolFilter::default()).unwrap();
        assert_eq!(all.len(), protocol_rows().len() + 1);
    }

    #[test]
    fn seeded_questions_cover_every_scope() {
        let conn = test_db();
        seed_if_empty(&conn).unwrap();

        for scope in ProviderScope::ALL {
            let pool = fetch_questions(
                &conn,
                &QuestionFilter {
                    scope: Some(scope.as_str().into()),
                    ..Default::default()
                },
            )
            .unwrap();
            assert!(!pool.is_empty(), "no questions for {}", scope.as_str());
        }
    }

    #[test]
    fn catalog_uses_canonical_enum_labels() {
        for row in medication_rows() {
            ProviderScope::from_str(&row.scope).unwrap();
        }
        for row in question_rows() {
            ProviderScope::from_str(&row.scope).unwrap();
            QuestionKind::from_str(&row.question_type).unwrap();
            assert!(!row.options.is_empty());
        }
        for row in protocol_rows() {
            AgeGroup::from_str(&row.age_group).unwrap();
            let path = row.file_path.as_deref().unwrap_or_default();
            assert!(path.starts_with("/protocols/clark-county/"));
        }
    }
}
