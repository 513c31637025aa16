// cvar.rs — dynamic variable tracking

use crate::common::com_printf;
use crate::shared::{CVAR_ARCHIVE, CVAR_NOSET};

use std::collections::HashMap;

/// A console variable.
#[derive(Clone)]
pub struct Cvar {
    pub name: String,
    pub string: String,
    pub flags: i32,
    pub modified: bool,
    pub value: f32,
}

/// The full cvar system context.
pub struct CvarContext {
    pub cvar_vars: Vec<Cvar>,
    /// O(1) cvar lookup by name -> index in cvar_vars
    cvar_index: HashMap<String, usize>,
}

impl CvarContext {
    pub fn new() -> Self {
        Self {
            cvar_vars: Vec::new(),
            cvar_index: HashMap::new(),
        }
    }

    /// Find a cvar by name, returning its index.
    pub fn find_var_index(&self, name: &str) -> Option<usize> {
        self.cvar_index.get(name).copied()
    }

    /// Find a cvar by name.
    pub fn find_var(&self, name: &str) -> Option<&Cvar> {
        self.cvar_index.get(name).map(|&idx| &self.cvar_vars[idx])
    }

    /// Get the floating-point value of a cvar. Returns 0 if not found.
    pub fn variable_value(&self, name: &str) -> f32 {
        match self.find_var(name) {
            Some(var) => var.value,
            None => 0.0,
        }
    }

    /// Get the string value of a cvar. Returns "" if not found.
    pub fn variable_string(&self, name: &str) -> &str {
        match self.find_var(name) {
            Some(var) => &var.string,
            None => "",
        }
    }

    /// Get or create a cvar. If it already exists, the value is not changed
    /// but flags are OR'd in.
    pub fn get(&mut self, name: &str, value: &str, flags: i32) -> usize {
        if let Some(&idx) = self.cvar_index.get(name) {
            self.cvar_vars[idx].flags |= flags;
            return idx;
        }

        let float_val = value.parse::<f32>().unwrap_or(0.0);
        let idx = self.cvar_vars.len();
        self.cvar_vars.push(Cvar {
            name: name.to_string(),
            string: value.to_string(),
            flags,
            modified: true,
            value: float_val,
        });
        self.cvar_index.insert(name.to_string(), idx);

        idx
    }

    /// Internal set implementation.
    fn set2(&mut self, name: &str, value: &str, force: bool) -> usize {
        let idx = match self.find_var_index(name) {
            Some(idx) => idx,
            None => return self.get(name, value, 0),
        };

        if !force && self.cvar_vars[idx].flags & CVAR_NOSET != 0 {
            com_printf(&format!("{} is write protected.\n", name));
            return idx;
        }

        if value == self.cvar_vars[idx].string {
            return idx; // not changed
        }

        self.cvar_vars[idx].modified = true;
        self.cvar_vars[idx].string = value.to_string();
        self.cvar_vars[idx].value = value.parse::<f32>().unwrap_or(0.0);

        idx
    }

    /// Set a cvar value (respects NOSET).
    pub fn set(&mut self, name: &str, value: &str) -> usize {
        self.set2(name, value, false)
    }

    /// Force-set a cvar value (ignores NOSET).
    pub fn force_set(&mut self, name: &str, value: &str) -> usize {
        self.set2(name, value, true)
    }

    /// Set a cvar from a float value.
    pub fn set_value(&mut self, name: &str, value: f32) {
        let val_str = if value == (value as i32) as f32 {
            format!("{}", value as i32)
        } else {
            format!("{}", value)
        };
        self.set(name, &val_str);
    }

    /// Write all archived cvars to a writer.
    pub fn write_variables(&self, writer: &mut dyn std::io::Write) -> std::io::Result<()> {
        for var in &self.cvar_vars {
            if var.flags & CVAR_ARCHIVE != 0 {
                writeln!(writer, "set {} \"{}\"", var.name, var.string)?;
            }
        }
        Ok(())
    }

    /// List all cvars to the console. Returns the count.
    pub fn list(&self) -> usize {
        for var in &self.cvar_vars {
            let archive = if var.flags & CVAR_ARCHIVE != 0 { '*' } else { ' ' };
            let noset = if var.flags & CVAR_NOSET != 0 { '-' } else { ' ' };
            com_printf(&format!("{}{} {} \"{}\"\n", archive, noset, var.name, var.string));
        }
        com_printf(&format!("{} cvars\n", self.cvar_vars.len()));
        self.cvar_vars.len()
    }

    /// Register every variable the simulation consumes, with its default.
    /// Existing values are left untouched (get semantics).
    pub fn register_defaults(&mut self) {
        self.get("cell_size", "1", CVAR_NOSET); // world units per cell
        self.get("pm_radius", "0.3", CVAR_ARCHIVE); // collision safety margin
        self.get("pm_speed", "2.5", CVAR_ARCHIVE);
        self.get("pm_substeps", "30", CVAR_ARCHIVE);
        self.get("pm_safetyscale", "1.6", CVAR_ARCHIVE); // ring probe only
        self.get("sensitivity", "0.1", CVAR_ARCHIVE);
        self.get("cl_pitchclamp", "89", 0);
        self.get("cl_eyeheight", "1", 0);
        self.get("r_wallheight", "4", 0);
        self.get("r_showgrid", "0", CVAR_ARCHIVE);
        self.get("developer", "0", 0);
    }
}

impl Default for CvarContext {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================
// Global singleton and free-function wrappers
// ============================================================

use std::sync::Mutex;

static CVAR_CTX: Mutex<Option<CvarContext>> = Mutex::new(None);

pub fn cvar_init() {
    let mut g = CVAR_CTX.lock().unwrap();
    let mut ctx = CvarContext::new();
    ctx.register_defaults();
    *g = Some(ctx);
}

pub fn cvar_shutdown() {
    let mut g = CVAR_CTX.lock().unwrap();
    *g = None;
}

pub fn cvar_get(name: &str, value: &str, flags: i32) -> Option<usize> {
    CVAR_CTX.lock().unwrap().as_mut().map(|c| c.get(name, value, flags))
}

pub fn cvar_set(name: &str, value: &str) {
    if let Some(ref mut c) = *CVAR_CTX.lock().unwrap() {
        c.set(name, value);
    }
}

pub fn cvar_set_value(name: &str, value: f32) {
    if let Some(ref mut c) = *CVAR_CTX.lock().unwrap() {
        c.set_value(name, value);
    }
}

pub fn cvar_force_set(name: &str, value: &str) {
    if let Some(ref mut c) = *CVAR_CTX.lock().unwrap() {
        c.force_set(name, value);
    }
}

pub fn cvar_variable_value(name: &str) -> f32 {
    CVAR_CTX.lock().unwrap().as_ref().map_or(0.0, |c| c.variable_value(name))
}

pub fn cvar_variable_string(name: &str) -> String {
    CVAR_CTX
        .lock()
        .unwrap()
        .as_ref()
        .map_or(String::new(), |c| c.variable_string(name).to_string())
}

pub fn cvar_write_variables(f: &mut dyn std::io::Write) {
    if let Some(ref c) = *CVAR_CTX.lock().unwrap() {
        let _ = c.write_variables(f);
    }
}

/// Access the global CVAR_CTX with a closure. Returns None if not initialized.
pub fn with_cvar_ctx<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut CvarContext) -> R,
{
    let mut g = CVAR_CTX.lock().unwrap();
    g.as_mut().map(f)
}

// ============================================================
// Tests
// ============================================================
