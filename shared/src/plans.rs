//! Daily plan generator
//!
//! Builds a workout, a five-meal plan and a day timeline from a goal, a
//! fitness level and the time and calories available. Exercise and meal
//! templates are static; only sets, reps, meal calories and totals vary.

use crate::errors::CalcError;
use crate::health_metrics::{normalize_key, round_half_up, FitnessGoal};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Target calories when the caller does not supply one
pub const DEFAULT_TARGET_CALORIES: u32 = 2_000;
/// Minutes allotted to warm-up and cool-down in the time estimate
const WARMUP_MINUTES: u32 = 10;
const COOLDOWN_MINUTES: u32 = 8;
/// Minutes per main exercise in the time estimate
const MINUTES_PER_EXERCISE: u32 = 3;

// ============================================================================
// Preferences
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    fn index(&self) -> usize {
        match self {
            FitnessLevel::Beginner => 0,
            FitnessLevel::Intermediate => 1,
            FitnessLevel::Advanced => 2,
        }
    }
}

impl FromStr for FitnessLevel {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "beginner" => Ok(FitnessLevel::Beginner),
            "intermediate" => Ok(FitnessLevel::Intermediate),
            "advanced" => Ok(FitnessLevel::Advanced),
            _ => Err(CalcError::unrecognized("fitness level", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanPreferences {
    pub goal: FitnessGoal,
    pub fitness_level: FitnessLevel,
    /// Minutes available for the workout
    pub workout_minutes: u32,
    /// Base calorie target before the goal adjustment
    pub target_calories: Option<u32>,
}

// ============================================================================
// Templates
// ============================================================================

/// Exercise with per-level prescriptions (beginner, intermediate, advanced)
#[derive(Debug)]
struct ExerciseTemplate {
    name: &'static str,
    sets: [u32; 3],
    reps: [&'static str; 3],
    rest_seconds: u32,
    instructions: &'static [&'static str],
    modifications: [&'static str; 3],
}

struct WorkoutTemplate {
    warmup: &'static [ExerciseTemplate],
    main: &'static [ExerciseTemplate],
    cooldown: &'static [ExerciseTemplate],
}

/// Meal whose calories are a fixed share of the day's target
struct MealTemplate {
    name: &'static str,
    calorie_share: f64,
    protein_g: u32,
    carbs_g: u32,
    fats_g: u32,
    ingredients: &'static [&'static str],
    prep_minutes: u32,
}

struct MealTemplates {
    breakfast: MealTemplate,
    lunch: MealTemplate,
    dinner: MealTemplate,
    snack1: MealTemplate,
    snack2: MealTemplate,
}

static WEIGHT_LOSS_WORKOUT: WorkoutTemplate = WorkoutTemplate {
    warmup: &[ExerciseTemplate {
        name: "Dynamic Warm-up",
        sets: [1, 1, 1],
        reps: ["5-10 minutes"; 3],
        rest_seconds: 0,
        instructions: &[
            "Arm circles (30 seconds each direction)",
            "Leg swings (30 seconds each leg)",
            "Hip circles (30 seconds each direction)",
            "Light cardio (marching in place, jumping jacks)",
        ],
        modifications: [
            "Take breaks as needed, focus on form",
            "Maintain steady pace throughout",
            "Add dynamic stretches and mobility work",
        ],
    }],
    main: &[
        ExerciseTemplate {
            name: "Burpees",
            sets: [3, 4, 5],
            reps: ["5-8", "8-12", "12-15"],
            rest_seconds: 60,
            instructions: &[
                "Start standing, squat down and place hands on floor",
                "Jump feet back into plank position",
                "Perform push-up (optional for beginners)",
                "Jump feet back to squat, then jump up with arms overhead",
            ],
            modifications: [
                "Step back instead of jumping, skip push-up",
                "Include push-up, maintain good form",
                "Add tuck jump at the top",
            ],
        },
        ExerciseTemplate {
            name: "Mountain Climbers",
            sets: [3, 4, 4],
            reps: ["20 seconds", "30 seconds", "45 seconds"],
            rest_seconds: 45,
            instructions: &[
                "Start in plank position",
                "Alternate bringing knees to chest rapidly",
                "Keep core tight and hips level",
                "Maintain steady breathing",
            ],
            modifications: [
                "Slow pace, focus on form",
                "Moderate pace, maintain plank",
                "Fast pace, add cross-body movement",
            ],
        },
        ExerciseTemplate {
            name: "Jump Squats",
            sets: [3, 4, 4],
            reps: ["8-10", "12-15", "15-20"],
            rest_seconds: 60,
            instructions: &[
                "Stand with feet shoulder-width apart",
                "Squat down keeping chest up",
                "Explode up into a jump",
                "Land softly and immediately go into next rep",
            ],
            modifications: [
                "Regular squats without jump",
                "Small jump, focus on landing",
                "High jump, add arm movement",
            ],
        },
        ExerciseTemplate {
            name: "High-Intensity Intervals",
            sets: [4, 6, 8],
            reps: ["30 sec work / 30 sec rest"; 3],
            rest_seconds: 30,
            instructions: &[
                "Choose: jumping jacks, high knees, or butt kicks",
                "Work at maximum effort for 30 seconds",
                "Rest for 30 seconds",
                "Repeat for specified sets",
            ],
            modifications: [
                "20 sec work / 40 sec rest",
                "30 sec work / 30 sec rest",
                "40 sec work / 20 sec rest",
            ],
        },
    ],
    cooldown: &[ExerciseTemplate {
        name: "Cool-down Stretches",
        sets: [1, 1, 1],
        reps: ["5-10 minutes"; 3],
        rest_seconds: 0,
        instructions: &[
            "Forward fold (30 seconds)",
            "Quad stretch (30 seconds each leg)",
            "Calf stretch (30 seconds each leg)",
            "Shoulder stretch (30 seconds each arm)",
            "Deep breathing (2 minutes)",
        ],
        modifications: [
            "Hold stretches gently, don't force",
            "Hold stretches with slight tension",
            "Add deeper stretches and yoga poses",
        ],
    }],
};

static MUSCLE_GAIN_WORKOUT: WorkoutTemplate = WorkoutTemplate {
    warmup: &[ExerciseTemplate {
        name: "Dynamic Warm-up",
        sets: [1, 1, 1],
        reps: ["8-10 minutes"; 3],
        rest_seconds: 0,
        instructions: &[
            "Arm swings and circles (2 minutes)",
            "Bodyweight squats (1 minute)",
            "Push-up to downward dog (1 minute)",
            "Leg swings and hip circles (2 minutes)",
            "Light resistance band work (2 minutes)",
        ],
        modifications: [
            "Focus on mobility and activation",
            "Add light resistance movements",
            "Include compound movement patterns",
        ],
    }],
    main: &[
        ExerciseTemplate {
            name: "Push-ups (Chest Focus)",
            sets: [3, 4, 5],
            reps: ["8-12", "12-15", "15-20"],
            rest_seconds: 90,
            instructions: &[
                "Start in plank position, hands slightly wider than shoulders",
                "Lower chest to floor with control",
                "Push back up maintaining straight line",
                "Focus on chest contraction at top",
            ],
            modifications: [
                "Knee push-ups or incline push-ups",
                "Standard push-ups, focus on form",
                "Decline push-ups or weighted vest",
            ],
        },
        ExerciseTemplate {
            name: "Bodyweight Squats",
            sets: [3, 4, 4],
            reps: ["12-15", "15-20", "20-25"],
            rest_seconds: 75,
            instructions: &[
                "Stand with feet shoulder-width apart",
                "Lower down as if sitting in chair",
                "Keep chest up and knees behind toes",
                "Drive through heels to stand",
            ],
            modifications: [
                "Use chair for support if needed",
                "Full range of motion squats",
                "Jump squats or single-leg squats",
            ],
        },
        ExerciseTemplate {
            name: "Pike Push-ups (Shoulders)",
            sets: [3, 4, 4],
            reps: ["6-10", "10-12", "12-15"],
            rest_seconds: 90,
            instructions: &[
                "Start in downward dog position",
                "Lower head toward floor between hands",
                "Push back up to starting position",
                "Keep legs as straight as possible",
            ],
            modifications: [
                "Elevate feet on low surface",
                "Standard pike push-ups",
                "Feet elevated on high surface",
            ],
        },
        ExerciseTemplate {
            name: "Tricep Dips",
            sets: [3, 4, 4],
            reps: ["8-12", "12-15", "15-20"],
            rest_seconds: 75,
            instructions: &[
                "Sit on edge of chair or bench",
                "Place hands beside hips, slide forward",
                "Lower body by bending elbows",
                "Push back up focusing on triceps",
            ],
            modifications: [
                "Feet flat on floor, shallow dips",
                "Legs extended, full range",
                "Feet elevated, add weight",
            ],
        },
        ExerciseTemplate {
            name: "Plank to Push-up",
            sets: [3, 4, 4],
            reps: ["5-8", "8-12", "12-15"],
            rest_seconds: 90,
            instructions: &[
                "Start in forearm plank position",
                "Push up to high plank one arm at a time",
                "Lower back to forearm plank",
                "Alternate leading arm each rep",
            ],
            modifications: [
                "From knees, focus on control",
                "Full plank, steady pace",
                "Add push-up at top position",
            ],
        },
    ],
    cooldown: &[ExerciseTemplate {
        name: "Muscle Recovery Stretches",
        sets: [1, 1, 1],
        reps: ["8-10 minutes"; 3],
        rest_seconds: 0,
        instructions: &[
            "Chest doorway stretch (1 minute)",
            "Overhead tricep stretch (1 minute each arm)",
            "Hip flexor stretch (1 minute each leg)",
            "Hamstring stretch (1 minute each leg)",
            "Spinal twist (1 minute each side)",
            "Child's pose (2 minutes)",
        ],
        modifications: [
            "Gentle stretches, hold comfortably",
            "Moderate stretch with breathing",
            "Deep stretches, add PNF techniques",
        ],
    }],
};

static WEIGHT_LOSS_MEALS: MealTemplates = MealTemplates {
    breakfast: MealTemplate {
        name: "Protein Power Bowl",
        calorie_share: 0.25,
        protein_g: 25,
        carbs_g: 30,
        fats_g: 12,
        ingredients: &[
            "2 eggs (scrambled or poached)",
            "1/2 cup oatmeal",
            "1/2 cup berries",
            "1 tbsp almond butter",
            "1 cup spinach",
            "1/4 avocado",
        ],
        prep_minutes: 15,
    },
    lunch: MealTemplate {
        name: "Mediterranean Salad Bowl",
        calorie_share: 0.30,
        protein_g: 30,
        carbs_g: 25,
        fats_g: 15,
        ingredients: &[
            "4 oz grilled chicken breast",
            "2 cups mixed greens",
            "1/2 cup quinoa",
            "1/4 cup chickpeas",
            "1/4 cup cucumber",
            "2 tbsp feta cheese",
            "1 tbsp olive oil vinaigrette",
        ],
        prep_minutes: 20,
    },
    dinner: MealTemplate {
        name: "Lean Protein & Vegetables",
        calorie_share: 0.35,
        protein_g: 35,
        carbs_g: 20,
        fats_g: 18,
        ingredients: &[
            "5 oz white fish or chicken",
            "2 cups steamed broccoli",
            "1/2 cup brown rice",
            "1 tbsp olive oil",
            "Herbs and spices",
            "1 cup mixed vegetables",
        ],
        prep_minutes: 25,
    },
    snack1: MealTemplate {
        name: "Apple & Almond Butter",
        calorie_share: 0.05,
        protein_g: 4,
        carbs_g: 15,
        fats_g: 8,
        ingredients: &["1 medium apple", "1 tbsp almond butter"],
        prep_minutes: 2,
    },
    snack2: MealTemplate {
        name: "Protein Smoothie",
        calorie_share: 0.05,
        protein_g: 20,
        carbs_g: 10,
        fats_g: 3,
        ingredients: &[
            "1 scoop protein powder",
            "1 cup unsweetened almond milk",
            "1/2 banana",
            "Ice",
        ],
        prep_minutes: 3,
    },
};

static MUSCLE_GAIN_MEALS: MealTemplates = MealTemplates {
    breakfast: MealTemplate {
        name: "Muscle Building Breakfast",
        calorie_share: 0.25,
        protein_g: 35,
        carbs_g: 45,
        fats_g: 20,
        ingredients: &[
            "3 whole eggs + 2 egg whites",
            "1 cup oatmeal",
            "1 banana",
            "2 tbsp peanut butter",
            "1 cup whole milk",
            "1/4 cup blueberries",
        ],
        prep_minutes: 12,
    },
    lunch: MealTemplate {
        name: "Power Lunch Bowl",
        calorie_share: 0.30,
        protein_g: 40,
        carbs_g: 50,
        fats_g: 22,
        ingredients: &[
            "6 oz lean ground turkey",
            "1 cup brown rice",
            "1/2 cup black beans",
            "1/4 avocado",
            "1/4 cup shredded cheese",
            "Mixed vegetables",
            "2 tbsp olive oil",
        ],
        prep_minutes: 18,
    },
    dinner: MealTemplate {
        name: "Anabolic Dinner",
        calorie_share: 0.35,
        protein_g: 45,
        carbs_g: 40,
        fats_g: 25,
        ingredients: &[
            "7 oz salmon or lean beef",
            "1.5 cups sweet potato",
            "2 cups mixed vegetables",
            "2 tbsp olive oil",
            "1/4 cup nuts",
            "Herbs and seasonings",
        ],
        prep_minutes: 30,
    },
    snack1: MealTemplate {
        name: "Post-Workout Shake",
        calorie_share: 0.05,
        protein_g: 25,
        carbs_g: 20,
        fats_g: 5,
        ingredients: &["1 scoop whey protein", "1 cup whole milk", "1/2 banana", "1 tbsp honey"],
        prep_minutes: 2,
    },
    snack2: MealTemplate {
        name: "Muscle Building Snack",
        calorie_share: 0.05,
        protein_g: 15,
        carbs_g: 25,
        fats_g: 12,
        ingredients: &["1/4 cup mixed nuts", "1 large apple", "1 string cheese"],
        prep_minutes: 3,
    },
};

/// Goals without a dedicated plan share the muscle-gain templates
fn workout_template(goal: FitnessGoal) -> &'static WorkoutTemplate {
    match goal {
        FitnessGoal::WeightLoss => &WEIGHT_LOSS_WORKOUT,
        FitnessGoal::MuscleGain | FitnessGoal::Maintenance | FitnessGoal::Endurance => {
            &MUSCLE_GAIN_WORKOUT
        }
    }
}

fn meal_templates(goal: FitnessGoal) -> &'static MealTemplates {
    match goal {
        FitnessGoal::WeightLoss => &WEIGHT_LOSS_MEALS,
        FitnessGoal::MuscleGain | FitnessGoal::Maintenance | FitnessGoal::Endurance => {
            &MUSCLE_GAIN_MEALS
        }
    }
}

// ============================================================================
// Generated Plan
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exercise {
    pub name: &'static str,
    pub sets: u32,
    pub reps: &'static str,
    pub rest_seconds: u32,
    pub instructions: &'static [&'static str],
    /// Adjustment for the requested fitness level
    pub modification: &'static str,
}

impl ExerciseTemplate {
    fn for_level(&self, level: FitnessLevel) -> Exercise {
        let i = level.index();
        Exercise {
            name: self.name,
            sets: self.sets[i],
            reps: self.reps[i],
            rest_seconds: self.rest_seconds,
            instructions: self.instructions,
            modification: self.modifications[i],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutPlan {
    pub warmup: Vec<Exercise>,
    pub main: Vec<Exercise>,
    pub cooldown: Vec<Exercise>,
    pub total_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meal {
    pub name: &'static str,
    pub calories: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fats_g: u32,
    pub ingredients: &'static [&'static str],
    pub prep_minutes: u32,
}

impl MealTemplate {
    fn for_target(&self, target_calories: u32) -> Meal {
        Meal {
            name: self.name,
            calories: round_half_up(target_calories as f64 * self.calorie_share) as u32,
            protein_g: self.protein_g,
            carbs_g: self.carbs_g,
            fats_g: self.fats_g,
            ingredients: self.ingredients,
            prep_minutes: self.prep_minutes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealPlan {
    pub target_calories: u32,
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    pub snack1: Meal,
    pub snack2: Meal,
}

impl MealPlan {
    pub fn meals(&self) -> [&Meal; 5] {
        [&self.breakfast, &self.lunch, &self.dinner, &self.snack1, &self.snack2]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineKind {
    Meal,
    Workout,
    Hydration,
    Rest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineItem {
    pub time: &'static str,
    pub activity: &'static str,
    pub details: String,
    pub kind: TimelineKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fats_g: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPlan {
    pub workout: WorkoutPlan,
    pub meals: MealPlan,
    pub timeline: Vec<TimelineItem>,
    pub total_calories: u32,
    pub total_macros: MacroTotals,
}

// ============================================================================
// Generators
// ============================================================================

/// Workout for a goal and level, time-boxed to the minutes available
///
/// Estimated time is warm-up + 3 minutes per main exercise + cool-down.
pub fn generate_workout_plan(prefs: &PlanPreferences) -> WorkoutPlan {
    let template = workout_template(prefs.goal);
    let render = |exercises: &'static [ExerciseTemplate]| -> Vec<Exercise> {
        exercises.iter().map(|e| e.for_level(prefs.fitness_level)).collect()
    };

    let estimate =
        WARMUP_MINUTES + template.main.len() as u32 * MINUTES_PER_EXERCISE + COOLDOWN_MINUTES;

    WorkoutPlan {
        warmup: render(template.warmup),
        main: render(template.main),
        cooldown: render(template.cooldown),
        total_minutes: estimate.min(prefs.workout_minutes),
    }
}

/// Day's calorie target: the base target plus the goal adjustment
pub fn plan_target_calories(prefs: &PlanPreferences) -> u32 {
    let base = prefs.target_calories.unwrap_or(DEFAULT_TARGET_CALORIES) as f64;
    (base + prefs.goal.calorie_adjustment()).max(0.0) as u32
}

pub fn generate_meal_plan(prefs: &PlanPreferences) -> MealPlan {
    let target = plan_target_calories(prefs);
    let templates = meal_templates(prefs.goal);

    MealPlan {
        target_calories: target,
        breakfast: templates.breakfast.for_target(target),
        lunch: templates.lunch.for_target(target),
        dinner: templates.dinner.for_target(target),
        snack1: templates.snack1.for_target(target),
        snack2: templates.snack2.for_target(target),
    }
}

fn timeline_item(
    time: &'static str,
    activity: &'static str,
    details: impl Into<String>,
    kind: TimelineKind,
    calories: Option<u32>,
) -> TimelineItem {
    TimelineItem {
        time,
        activity,
        details: details.into(),
        kind,
        calories,
    }
}

fn meal_item(time: &'static str, activity: &'static str, meal: &Meal) -> TimelineItem {
    timeline_item(time, activity, meal.name, TimelineKind::Meal, Some(meal.calories))
}

pub fn generate_timeline(goal: FitnessGoal, workout: &WorkoutPlan, meals: &MealPlan) -> Vec<TimelineItem> {
    use TimelineKind::{Hydration, Rest, Workout};

    vec![
        timeline_item("6:00 AM", "Wake Up & Hydration", "Drink 16-20 oz water", Hydration, None),
        meal_item("7:00 AM", "Breakfast", &meals.breakfast),
        timeline_item(
            "9:00 AM",
            "Workout",
            format!("{} min {} workout", workout.total_minutes, goal.as_str().replace('_', " ")),
            Workout,
            None,
        ),
        meal_item("10:30 AM", "Post-Workout", &meals.snack1),
        timeline_item("11:00 AM", "Hydration", "Drink 12-16 oz water", Hydration, None),
        meal_item("1:00 PM", "Lunch", &meals.lunch),
        timeline_item("3:00 PM", "Hydration", "Drink 12-16 oz water", Hydration, None),
        meal_item("4:00 PM", "Afternoon Snack", &meals.snack2),
        meal_item("6:30 PM", "Dinner", &meals.dinner),
        timeline_item("8:00 PM", "Evening Hydration", "Drink 8-12 oz water", Hydration, None),
        timeline_item("10:00 PM", "Wind Down", "Prepare for sleep, light stretching", Rest, None),
        timeline_item("10:30 PM", "Sleep", "7-9 hours of quality sleep", Rest, None),
    ]
}

/// Full day: workout, meals, timeline and totals
pub fn generate_daily_plan(prefs: &PlanPreferences) -> DailyPlan {
    let workout = generate_workout_plan(prefs);
    let meals = generate_meal_plan(prefs);
    let timeline = generate_timeline(prefs.goal, &workout, &meals);

    let total_calories = meals.meals().iter().map(|m| m.calories).sum();
    let total_macros = meals.meals().iter().fold(MacroTotals::default(), |acc, m| MacroTotals {
        protein_g: acc.protein_g + m.protein_g,
        carbs_g: acc.carbs_g + m.carbs_g,
        fats_g: acc.fats_g + m.fats_g,
    });

    DailyPlan {
        workout,
        meals,
        timeline,
        total_calories,
        total_macros,
    }
}
